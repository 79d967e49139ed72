// Product model and bulk generator
//
// Products are synthesized in bulk whenever a filter/category/tab changes
// and replaced wholesale - no identity survives a regeneration.

use rand::Rng;

/// Direction of a product's day-over-day movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Arrow glyph for table rendering
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }
}

/// A single ranked product row
#[derive(Debug, Clone)]
pub struct Product {
    /// 1-based rank, unique within its list
    pub rank: usize,
    /// Display name (CJK catalog entry)
    pub name: String,
    /// Paid order count
    pub orders: u32,
    /// Gross merchandise value in yuan
    pub gmv: f64,
    /// Day-over-day movement
    pub trend: Trend,
}

/// Catalog of fresh-grocery SKU names the generator draws from
const PRODUCT_NAMES: &[&str] = &[
    "特级新疆纯牛奶 200ml*12",
    "智利进口车厘子 JJ级",
    "东北五常大米 5kg",
    "维达超韧抽纸 4层",
    "蓝月亮深层洁净洗衣液",
    "三只松鼠每日坚果",
    "海南贵妃芒 5斤装",
    "农夫山泉饮用天然水",
    "蒙牛纯甄酸牛奶",
    "金龙鱼1:1:1调和油",
    "云南白药牙膏",
    "奥利奥夹心饼干",
    "百事可乐无糖 330ml",
    "卫龙大面筋辣条",
    "帮宝适一级帮纸尿裤",
    "可口可乐 330ml*6",
    "康师傅红烧牛肉面",
    "海天生抽酱油 500ml",
    "清风卷纸 3层*10",
    "舒肤佳沐浴露 柠檬味",
    "高露洁牙刷 软毛",
    "立白洗洁精 1.5kg",
    "雀巢速溶咖啡 1+2",
    "百草味夏威夷果",
    "良品铺子芒果干",
    "旺旺雪饼",
    "乐事薯片 原味",
    "好丽友派",
    "伊利安慕希希腊酸奶",
    "王老吉凉茶",
];

/// Generate a ranked product list of `count` items.
///
/// Ranks are 1..=count; names cycle through the catalog with a batch
/// suffix once the catalog is exhausted; orders and GMV are random but
/// always non-negative. Callers cap `count` at 50.
pub fn generate_product_list(count: usize) -> Vec<Product> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let base = PRODUCT_NAMES[i % PRODUCT_NAMES.len()];
            let name = if i >= PRODUCT_NAMES.len() {
                format!("{} (批次{})", base, i / PRODUCT_NAMES.len())
            } else {
                base.to_string()
            };
            Product {
                rank: i + 1,
                name,
                orders: rng.gen_range(500..5500),
                gmv: (rng.gen_range(1000.0..21000.0_f64) * 100.0).round() / 100.0,
                trend: if rng.gen_bool(0.6) {
                    Trend::Up
                } else {
                    Trend::Down
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_monotonic_and_unique() {
        let products = generate_product_list(50);
        assert_eq!(products.len(), 50);
        for (i, p) in products.iter().enumerate() {
            assert_eq!(p.rank, i + 1);
        }
    }

    #[test]
    fn values_stay_in_range() {
        for p in generate_product_list(25) {
            assert!(p.orders >= 500);
            assert!(p.gmv >= 1000.0);
            assert!(!p.name.is_empty());
        }
    }

    #[test]
    fn names_past_catalog_get_batch_suffix() {
        let products = generate_product_list(50);
        assert!(products[35].name.contains("批次"));
        assert!(!products[10].name.contains("批次"));
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(generate_product_list(0).is_empty());
    }
}
