//! Taste preferences - four ordinal axes or "no preference"

/// Five-point ordinal position on a taste axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Scale {
    /// Leftmost slider position
    #[default]
    Lowest,
    /// Second position
    Low,
    /// Middle position
    Medium,
    /// Fourth position
    High,
    /// Rightmost slider position
    Highest,
}

impl Scale {
    /// Every position, left to right
    pub const STEPS: [Scale; 5] = [
        Scale::Lowest,
        Scale::Low,
        Scale::Medium,
        Scale::High,
        Scale::Highest,
    ];

    /// 1-based slider position
    pub fn position(&self) -> u8 {
        match self {
            Scale::Lowest => 1,
            Scale::Low => 2,
            Scale::Medium => 3,
            Scale::High => 4,
            Scale::Highest => 5,
        }
    }

    /// Build from a 1-based slider position
    pub fn from_position(position: u8) -> Option<Self> {
        match position {
            1 => Some(Scale::Lowest),
            2 => Some(Scale::Low),
            3 => Some(Scale::Medium),
            4 => Some(Scale::High),
            5 => Some(Scale::Highest),
            _ => None,
        }
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Scale::from_position)
            .ok_or_else(|| format!("Invalid taste level: {} (expected 1-5)", s))
    }
}

/// One of the four taste sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TasteAxis {
    /// Weight on the palate
    Body,
    /// Residual sugar
    Sweetness,
    /// Freshness, tartness
    Acidity,
    /// Astringency
    Tannin,
}

impl TasteAxis {
    /// Every axis, in form order
    pub const AXES: [TasteAxis; 4] = [
        TasteAxis::Body,
        TasteAxis::Sweetness,
        TasteAxis::Acidity,
        TasteAxis::Tannin,
    ];

    /// Axis name shown to customers and the model
    pub fn name(&self) -> &'static str {
        match self {
            TasteAxis::Body => "바디",
            TasteAxis::Sweetness => "당도",
            TasteAxis::Acidity => "산도",
            TasteAxis::Tannin => "타닌",
        }
    }

    /// Slider labels, left to right
    pub fn labels(&self) -> [&'static str; 5] {
        match self {
            TasteAxis::Body => ["매우 가벼움", "가벼움", "중간", "약간 무거움", "매우 진함"],
            TasteAxis::Sweetness => ["매우 드라이", "드라이", "중간", "약간 달콤", "매우 달콤"],
            TasteAxis::Acidity => ["낮음", "약간 낮음", "중간", "약간 높음", "매우 높음"],
            TasteAxis::Tannin => ["거의 없음", "부드러움", "중간", "약간 강함", "강함"],
        }
    }

    /// Label for a slider position on this axis
    pub fn label(&self, scale: Scale) -> &'static str {
        self.labels()[usize::from(scale.position() - 1)]
    }

    /// Parse an axis from its English short name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "body" => Some(TasteAxis::Body),
            "sweet" | "sweetness" => Some(TasteAxis::Sweetness),
            "acid" | "acidity" => Some(TasteAxis::Acidity),
            "tannin" => Some(TasteAxis::Tannin),
            _ => None,
        }
    }
}

/// What the customer told us about taste
///
/// Either the "auto / best pick" override, or all four axes. There is no way
/// to hold a partially filled preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TastePreference {
    /// Let the sommelier pick popular crowd-pleasers
    #[default]
    NoPreference,

    /// Explicit slider positions
    Explicit {
        /// Body slider
        body: Scale,
        /// Sweetness slider
        sweetness: Scale,
        /// Acidity slider
        acidity: Scale,
        /// Tannin slider
        tannin: Scale,
    },
}

/// Text sent to the model for [`TastePreference::NoPreference`]
pub const NO_PREFERENCE_TEXT: &str = "대중적 인기 와인";

impl TastePreference {
    /// Explicit preference with every slider at its leftmost position
    pub fn sliders_at_rest() -> Self {
        TastePreference::Explicit {
            body: Scale::default(),
            sweetness: Scale::default(),
            acidity: Scale::default(),
            tannin: Scale::default(),
        }
    }

    /// Slider position for an axis, if explicit
    pub fn get(&self, axis: TasteAxis) -> Option<Scale> {
        match *self {
            TastePreference::NoPreference => None,
            TastePreference::Explicit {
                body,
                sweetness,
                acidity,
                tannin,
            } => Some(match axis {
                TasteAxis::Body => body,
                TasteAxis::Sweetness => sweetness,
                TasteAxis::Acidity => acidity,
                TasteAxis::Tannin => tannin,
            }),
        }
    }

    /// Move one slider; "no preference" starts from the sliders at rest
    pub fn with_axis(self, axis: TasteAxis, scale: Scale) -> Self {
        let level = |a: TasteAxis| {
            if a == axis {
                scale
            } else {
                self.get(a).unwrap_or_default()
            }
        };

        TastePreference::Explicit {
            body: level(TasteAxis::Body),
            sweetness: level(TasteAxis::Sweetness),
            acidity: level(TasteAxis::Acidity),
            tannin: level(TasteAxis::Tannin),
        }
    }

    /// Human-readable description (`바디:중간, 당도:드라이, ...`)
    pub fn describe(&self) -> String {
        match self {
            TastePreference::NoPreference => NO_PREFERENCE_TEXT.to_string(),
            TastePreference::Explicit { .. } => TasteAxis::AXES
                .iter()
                .filter_map(|axis| self.get(*axis).map(|s| format!("{}:{}", axis.name(), axis.label(s))))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_positions_round_trip() {
        for scale in Scale::STEPS {
            assert_eq!(Scale::from_position(scale.position()), Some(scale));
        }
        assert_eq!(Scale::from_position(0), None);
        assert_eq!(Scale::from_position(6), None);
        assert!("9".parse::<Scale>().is_err());
        assert_eq!("3".parse::<Scale>().unwrap(), Scale::Medium);
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(TasteAxis::Body.label(Scale::Lowest), "매우 가벼움");
        assert_eq!(TasteAxis::Sweetness.label(Scale::Low), "드라이");
        assert_eq!(TasteAxis::Acidity.label(Scale::Highest), "매우 높음");
        assert_eq!(TasteAxis::Tannin.label(Scale::High), "약간 강함");
    }

    #[test]
    fn test_describe_no_preference() {
        assert_eq!(TastePreference::NoPreference.describe(), "대중적 인기 와인");
    }

    #[test]
    fn test_describe_explicit() {
        let pref = TastePreference::Explicit {
            body: Scale::Medium,
            sweetness: Scale::Low,
            acidity: Scale::High,
            tannin: Scale::Lowest,
        };
        assert_eq!(
            pref.describe(),
            "바디:중간, 당도:드라이, 산도:약간 높음, 타닌:거의 없음"
        );
    }

    #[test]
    fn test_with_axis_from_no_preference() {
        let pref = TastePreference::NoPreference.with_axis(TasteAxis::Tannin, Scale::Highest);
        assert_eq!(pref.get(TasteAxis::Tannin), Some(Scale::Highest));
        assert_eq!(pref.get(TasteAxis::Body), Some(Scale::Lowest));
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!(TasteAxis::parse("sweet"), Some(TasteAxis::Sweetness));
        assert_eq!(TasteAxis::parse("ACIDITY"), Some(TasteAxis::Acidity));
        assert_eq!(TasteAxis::parse("color"), None);
    }
}
