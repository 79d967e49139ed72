// Overview, category, and refund datasets
//
// Static shapes with randomized values: the hourly today/yesterday
// series, the five headline metric cards, category/sub-category sales,
// and the refund-reason distribution.

use rand::Rng;

/// One point of the hourly sales curve
#[derive(Debug, Clone)]
pub struct OverviewPoint {
    pub time: &'static str,
    pub today: f64,
    pub yesterday: f64,
}

/// Fixed sample times across the day
const OVERVIEW_TIMES: [&str; 7] = ["00:00", "04:00", "08:00", "12:00", "16:00", "20:00", "23:59"];

/// A headline metric card (GMV, UV, buyers, conversion, refund rate)
#[derive(Debug, Clone)]
pub struct MetricCard {
    pub title: &'static str,
    /// Formatted display value, e.g. "¥ 126,560" or "14.5%"
    pub value: String,
    /// Yesterday's value for the sub-line
    pub sub_value: String,
    /// Day-over-day change in percent (signed)
    pub dod_percent: f64,
}

/// Hourly today/yesterday series. Both curves rise monotonically over
/// the day (cumulative sales), today tracking above yesterday.
pub fn generate_overview_series() -> Vec<OverviewPoint> {
    let mut rng = rand::thread_rng();
    let mut today = 0.0;
    let mut yesterday = 0.0;
    OVERVIEW_TIMES
        .iter()
        .map(|time| {
            today += rng.gen_range(5.0..30.0);
            yesterday += rng.gen_range(4.0..25.0);
            OverviewPoint {
                time,
                today,
                yesterday,
            }
        })
        .collect()
}

/// The five headline cards of the overview section
pub fn generate_metric_cards() -> Vec<MetricCard> {
    let mut rng = rand::thread_rng();
    let gmv: f64 = rng.gen_range(100_000.0..160_000.0);
    let uv: u32 = rng.gen_range(6_000..10_000);
    let buyers: u32 = rng.gen_range(900..1_600);
    let cvr: f64 = rng.gen_range(10.0..18.0);
    let refund: f64 = rng.gen_range(2.0..5.0);

    vec![
        MetricCard {
            title: "总销售额 (GMV)",
            value: format!("¥ {}", group_thousands(gmv as u64)),
            sub_value: group_thousands((gmv * 0.9) as u64),
            dod_percent: rng.gen_range(2.0..20.0),
        },
        MetricCard {
            title: "访客数 (UV)",
            value: group_thousands(uv as u64),
            sub_value: group_thousands((uv as f64 * 0.85) as u64),
            dod_percent: rng.gen_range(-8.0..8.0),
        },
        MetricCard {
            title: "支付买家数",
            value: group_thousands(buyers as u64),
            sub_value: group_thousands((buyers as f64 * 0.8) as u64),
            dod_percent: rng.gen_range(0.0..25.0),
        },
        MetricCard {
            title: "支付转化率",
            value: format!("{:.1}%", cvr),
            sub_value: format!("{:.1}%", cvr - 1.3),
            dod_percent: 1.3,
        },
        MetricCard {
            title: "退款率",
            value: format!("{:.1}%", refund),
            sub_value: format!("{:.1}%", refund + 0.9),
            dod_percent: -0.9,
        },
    ]
}

/// Fixed category tabs of the category analysis section
pub const CATEGORIES: [&str; 6] = [
    "粮油调味",
    "生鲜水果",
    "休闲零食",
    "肉禽蛋品",
    "乳饮酒水",
    "速冻食品",
];

/// A named sales figure (sub-category bar or refund reason)
#[derive(Debug, Clone)]
pub struct NamedValue {
    pub name: &'static str,
    pub value: u32,
}

/// Sub-category breakdown for a category index. Values are randomized
/// but sorted descending so the bar chart always reads top-down.
pub fn generate_subcategories(category: usize) -> Vec<NamedValue> {
    const SUBCATEGORIES: [[&str; 5]; 6] = [
        ["食用油", "大米杂粮", "厨房调味", "面粉面条", "方便食品"],
        ["热带水果", "苹果/梨", "柑橘橙柚", "奇异果/莓", "车厘子"],
        ["坚果炒货", "肉干肉脯", "饼干蛋糕", "膨化食品", "糖巧"],
        ["牛肉", "羊肉", "猪肉", "禽肉", "蛋类"],
        ["纯牛奶", "酸奶", "饮用水", "果汁", "啤酒"],
        ["水饺/馄饨", "中式面点", "火锅丸料", "速冻半成品", "汤圆/元宵"],
    ];

    let mut rng = rand::thread_rng();
    let names = SUBCATEGORIES[category % SUBCATEGORIES.len()];
    let mut values: Vec<u32> = (0..names.len())
        .map(|_| rng.gen_range(1_500..9_000))
        .collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    names
        .iter()
        .zip(values)
        .map(|(name, value)| NamedValue { name, value })
        .collect()
}

/// Refund reason distribution (percentages summing to 100)
pub fn refund_reasons() -> Vec<NamedValue> {
    vec![
        NamedValue {
            name: "商品质量问题",
            value: 35,
        },
        NamedValue {
            name: "物流破损",
            value: 25,
        },
        NamedValue {
            name: "发错货/漏发",
            value: 25,
        },
        NamedValue {
            name: "不喜欢/拍错",
            value: 15,
        },
    ]
}

/// Headline figures for the refund view
#[derive(Debug, Clone)]
pub struct RefundSummary {
    /// Today's refund amount in yuan
    pub amount: f64,
    /// Today's refund order count
    pub orders: u32,
    /// Day-over-day change of the amount in percent
    pub amount_dod: f64,
    /// Day-over-day change of the count in percent
    pub orders_dod: f64,
}

pub fn generate_refund_summary() -> RefundSummary {
    let mut rng = rand::thread_rng();
    RefundSummary {
        amount: rng.gen_range(4_000.0..9_000.0),
        orders: rng.gen_range(25..70),
        amount_dod: rng.gen_range(-10.0..15.0),
        orders_dod: rng.gen_range(-10.0..15.0),
    }
}

/// Format an integer with thousands separators: 126560 -> "126,560"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_series_is_cumulative() {
        let series = generate_overview_series();
        assert_eq!(series.len(), 7);
        for pair in series.windows(2) {
            assert!(pair[1].today > pair[0].today);
            assert!(pair[1].yesterday > pair[0].yesterday);
        }
    }

    #[test]
    fn five_metric_cards() {
        let cards = generate_metric_cards();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].title, "总销售额 (GMV)");
    }

    #[test]
    fn subcategories_sorted_descending() {
        for cat in 0..CATEGORIES.len() {
            let bars = generate_subcategories(cat);
            assert_eq!(bars.len(), 5);
            for pair in bars.windows(2) {
                assert!(pair[0].value >= pair[1].value);
            }
        }
    }

    #[test]
    fn refund_reasons_sum_to_100() {
        let total: u32 = refund_reasons().iter().map(|r| r.value).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(126_560), "126,560");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
