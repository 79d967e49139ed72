// Channel datasets for the "sales growth factors" view
//
// Each sales channel carries a conversion funnel, a weekly click/pay
// trend, and a core-product contribution list. The whole dataset is
// regenerated on demand; nothing is mutated incrementally.

use super::product::{generate_product_list, Product};
use rand::Rng;

/// Number of products in each channel's contribution list
const CHANNEL_PRODUCT_COUNT: usize = 25;

/// Day labels for the weekly trend series
pub const WEEK_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// The three fixed sales channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Wechat,
    Community,
    Organic,
}

impl Channel {
    pub fn all() -> &'static [Channel] {
        &[Channel::Wechat, Channel::Community, Channel::Organic]
    }

    /// Display name for tab cards
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Wechat => "企业微信渠道",
            Channel::Community => "社群团购渠道",
            Channel::Organic => "自然搜索流量",
        }
    }

    /// Next channel tab (wraps around)
    pub fn next(self) -> Self {
        match self {
            Channel::Wechat => Channel::Community,
            Channel::Community => Channel::Organic,
            Channel::Organic => Channel::Wechat,
        }
    }

    /// Previous channel tab (wraps around)
    pub fn prev(self) -> Self {
        match self {
            Channel::Wechat => Channel::Organic,
            Channel::Community => Channel::Wechat,
            Channel::Organic => Channel::Community,
        }
    }

    /// Tab index for rendering
    pub fn index(&self) -> usize {
        match self {
            Channel::Wechat => 0,
            Channel::Community => 1,
            Channel::Organic => 2,
        }
    }
}

/// One stage of the conversion funnel
#[derive(Debug, Clone)]
pub struct FunnelStage {
    pub name: &'static str,
    pub value: u32,
}

/// One day of the weekly trend
#[derive(Debug, Clone)]
pub struct TrendPoint {
    pub day: &'static str,
    pub clicks: u32,
    pub pays: u32,
}

/// Headline figures for a channel's tab card
#[derive(Debug, Clone)]
pub struct ChannelSummary {
    /// Channel GMV in yuan
    pub gmv: f64,
    /// Day-over-day change in percent (signed)
    pub dod_percent: f64,
    /// Share of total sales in percent
    pub share_percent: u8,
}

/// Full dataset for one channel
#[derive(Debug, Clone)]
pub struct ChannelDataset {
    pub summary: ChannelSummary,
    pub funnel: Vec<FunnelStage>,
    pub trend: Vec<TrendPoint>,
    pub products: Vec<Product>,
}

impl ChannelDataset {
    /// Synthesize a fresh dataset for `channel`.
    ///
    /// The funnel is strictly decreasing by construction: every stage
    /// samples a fraction of the previous one. Organic traffic gets a
    /// deliberately leaky funnel (high UV, low conversion) to mirror a
    /// realistic channel mix.
    pub fn generate(channel: Channel) -> Self {
        let mut rng = rand::thread_rng();

        let (uv_range, retain_lo, retain_hi, gmv_range, share) = match channel {
            Channel::Wechat => (8000..10000, 0.40, 0.55, 55000.0..75000.0, 40),
            Channel::Community => (4500..6000, 0.45, 0.60, 35000.0..50000.0, 30),
            Channel::Organic => (10000..14000, 0.10, 0.20, 15000.0..25000.0, 15),
        };

        let mut value = rng.gen_range(uv_range);
        let stage_names = ["访客数 (UV)", "加购人数", "提交订单", "支付成功"];
        let funnel = stage_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i > 0 {
                    let retained = rng.gen_range(retain_lo..retain_hi);
                    // max(1) keeps the sequence strictly decreasing even
                    // when a stage rounds down to its predecessor
                    value = ((value as f64 * retained) as u32).min(value - 1).max(1);
                }
                FunnelStage { name, value }
            })
            .collect();

        let trend = WEEK_DAYS
            .iter()
            .map(|day| {
                let clicks = rng.gen_range(800..2800);
                let pays = (clicks as f64 * rng.gen_range(retain_lo..retain_hi)) as u32;
                TrendPoint { day, clicks, pays }
            })
            .collect();

        Self {
            summary: ChannelSummary {
                gmv: rng.gen_range(gmv_range),
                dod_percent: rng.gen_range(-5.0..15.0),
                share_percent: share,
            },
            funnel,
            trend,
            products: generate_product_list(CHANNEL_PRODUCT_COUNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funnel_is_strictly_decreasing() {
        for &channel in Channel::all() {
            let data = ChannelDataset::generate(channel);
            assert_eq!(data.funnel.len(), 4);
            for pair in data.funnel.windows(2) {
                assert!(
                    pair[0].value > pair[1].value,
                    "{}: {} -> {}",
                    channel.name(),
                    pair[0].value,
                    pair[1].value
                );
            }
        }
    }

    #[test]
    fn trend_has_seven_labeled_days() {
        let data = ChannelDataset::generate(Channel::Wechat);
        assert_eq!(data.trend.len(), 7);
        let days: Vec<&str> = data.trend.iter().map(|p| p.day).collect();
        assert_eq!(days, WEEK_DAYS);
    }

    #[test]
    fn pays_never_exceed_clicks() {
        let data = ChannelDataset::generate(Channel::Organic);
        for point in &data.trend {
            assert!(point.pays <= point.clicks);
        }
    }

    #[test]
    fn product_list_is_capped() {
        let data = ChannelDataset::generate(Channel::Community);
        assert_eq!(data.products.len(), CHANNEL_PRODUCT_COUNT);
        assert!(data.products.len() <= 50);
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(Channel::Wechat.next(), Channel::Community);
        assert_eq!(Channel::Organic.next(), Channel::Wechat);
        assert_eq!(Channel::Wechat.prev(), Channel::Organic);
    }
}
