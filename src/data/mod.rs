// Mock dataset generators
//
// All analytics data in the dashboard is synthesized here. Datasets are
// created in bulk and replaced wholesale when the user switches a
// filter; nothing is fetched or persisted.

pub mod channel;
pub mod overview;
pub mod product;

use channel::{Channel, ChannelDataset};
use overview::{MetricCard, OverviewPoint, RefundSummary};
use product::{generate_product_list, Product};

/// Number of products in the top-selling and rising lists
const RANKED_PRODUCT_COUNT: usize = 50;

/// Number of products in the refund-heavy list
const REFUND_PRODUCT_COUNT: usize = 25;

/// Everything the dashboard renders, generated up front and regenerated
/// piecewise as the user interacts (tab switches, category switches).
pub struct Dashboard {
    pub overview_series: Vec<OverviewPoint>,
    pub metric_cards: Vec<MetricCard>,
    pub channels: [ChannelDataset; 3],
    pub top_products: Vec<Product>,
    pub rising_products: Vec<Product>,
    pub refund_products: Vec<Product>,
    pub refund_summary: RefundSummary,
}

impl Dashboard {
    pub fn generate() -> Self {
        Self {
            overview_series: overview::generate_overview_series(),
            metric_cards: overview::generate_metric_cards(),
            channels: [
                ChannelDataset::generate(Channel::Wechat),
                ChannelDataset::generate(Channel::Community),
                ChannelDataset::generate(Channel::Organic),
            ],
            top_products: generate_product_list(RANKED_PRODUCT_COUNT),
            rising_products: generate_product_list(RANKED_PRODUCT_COUNT),
            refund_products: generate_product_list(REFUND_PRODUCT_COUNT),
            refund_summary: overview::generate_refund_summary(),
        }
    }

    /// Dataset for a channel tab
    pub fn channel(&self, channel: Channel) -> &ChannelDataset {
        &self.channels[channel.index()]
    }

    /// Regenerate the ranked product lists. Called on category switch -
    /// the old lists are discarded wholesale.
    pub fn refresh_ranked_products(&mut self) {
        self.top_products = generate_product_list(RANKED_PRODUCT_COUNT);
        self.rising_products = generate_product_list(RANKED_PRODUCT_COUNT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_has_all_datasets() {
        let dash = Dashboard::generate();
        assert_eq!(dash.metric_cards.len(), 5);
        assert_eq!(dash.top_products.len(), 50);
        assert_eq!(dash.rising_products.len(), 50);
        assert_eq!(dash.refund_products.len(), 25);
        assert_eq!(dash.channel(Channel::Wechat).funnel.len(), 4);
    }

    #[test]
    fn refresh_replaces_ranked_lists_wholesale() {
        let mut dash = Dashboard::generate();
        dash.refresh_ranked_products();
        assert_eq!(dash.top_products.len(), 50);
        assert_eq!(dash.top_products[0].rank, 1);
    }
}
