// Width breakpoints for responsive panel layout
//
// Single source of truth for the thresholds so render code never
// hard-codes column widths.

/// Terminal width class, ordered narrow to wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 70 cols: metric cards stack, status bar drops the log tail
    Compact,
    /// 70-119 cols: three cards per row
    Normal,
    /// 120+ cols: full five-card row
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        if width >= 120 {
            Breakpoint::Wide
        } else if width >= 70 {
            Breakpoint::Normal
        } else {
            Breakpoint::Compact
        }
    }

    /// At least this wide (inclusive)
    pub fn at_least(self, min: Breakpoint) -> bool {
        self >= min
    }

    /// Metric cards per row at this width
    pub fn card_columns(self) -> usize {
        match self {
            Breakpoint::Compact => 1,
            Breakpoint::Normal => 3,
            Breakpoint::Wide => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(69), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(70), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
    }

    #[test]
    fn ordering_drives_at_least() {
        assert!(Breakpoint::Normal.at_least(Breakpoint::Compact));
        assert!(Breakpoint::Normal.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Normal.at_least(Breakpoint::Wide));
    }

    #[test]
    fn card_columns_per_breakpoint() {
        assert_eq!(Breakpoint::Compact.card_columns(), 1);
        assert_eq!(Breakpoint::Normal.card_columns(), 3);
        assert_eq!(Breakpoint::Wide.card_columns(), 5);
    }
}
