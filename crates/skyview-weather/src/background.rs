//! Background selection: weather condition -> decorative asset.
//!
//! Every code resolves to something; anything without a table entry gets the
//! fallback video that is also shown before the first search.

use serde::Serialize;

use crate::types::{DisplayCondition, WeatherCategory};

/// How a display surface should render an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssetKind {
    AnimatedImage,
    Video,
}

/// A background asset, identified by its path relative to the asset root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetRef {
    pub path: &'static str,
    pub kind: AssetKind,
}

impl AssetRef {
    const fn image(path: &'static str) -> Self {
        Self {
            path,
            kind: AssetKind::AnimatedImage,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == AssetKind::Video
    }
}

pub const FALLBACK: AssetRef = AssetRef {
    path: "assets/857251-hd_1620_1080_25fps.mp4",
    kind: AssetKind::Video,
};

pub const THUNDERSTORM: AssetRef = AssetRef::image("assets/Thunderstorm.gif");
pub const RAIN: AssetRef = AssetRef::image("assets/Rain.gif");
pub const SNOW: AssetRef = AssetRef::image("assets/Snow.gif");
pub const CLEAR_DAY: AssetRef = AssetRef::image("assets/ClearDay.gif");
pub const CLEAR_NIGHT: AssetRef = AssetRef::image("assets/ClearNight.gif");
pub const CLOUDS_DAY: AssetRef = AssetRef::image("assets/CloudsDay.gif");
pub const CLOUDS_NIGHT: AssetRef = AssetRef::image("assets/CloudsNight.gif");
pub const HAZE: AssetRef = AssetRef::image("assets/Haze.gif");

/// Table entry for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundEntry {
    Single(AssetRef),
    DayNight { day: AssetRef, night: AssetRef },
}

impl BackgroundEntry {
    pub fn pick(self, is_daytime: bool) -> AssetRef {
        match self {
            Self::Single(asset) => asset,
            Self::DayNight { day, night } => {
                if is_daytime {
                    day
                } else {
                    night
                }
            }
        }
    }
}

/// Table lookup. Drizzle shares Rain's asset; Mist, Smoke and Fog share Haze's.
pub fn entry_for(category: WeatherCategory) -> BackgroundEntry {
    use BackgroundEntry::{DayNight, Single};
    use WeatherCategory as C;

    match category {
        C::Thunderstorm => Single(THUNDERSTORM),
        C::Drizzle | C::Rain => Single(RAIN),
        C::Snow => Single(SNOW),
        C::Clear => DayNight {
            day: CLEAR_DAY,
            night: CLEAR_NIGHT,
        },
        C::Clouds => DayNight {
            day: CLOUDS_DAY,
            night: CLOUDS_NIGHT,
        },
        C::Mist | C::Smoke | C::Haze | C::Fog => Single(HAZE),
    }
}

/// Background for an optional category; `None` gets the fallback
pub fn resolve_category(category: Option<WeatherCategory>, is_daytime: bool) -> AssetRef {
    category
        .map(entry_for)
        .map_or(FALLBACK, |entry| entry.pick(is_daytime))
}

/// Background for the current display condition, or the fallback when there
/// is none yet or its code maps to no category
pub fn resolve_background(condition: Option<&DisplayCondition>) -> AssetRef {
    match condition {
        None => FALLBACK,
        Some(c) => resolve_category(WeatherCategory::from_wmo_code(c.condition_code), c.is_daytime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(code: i32, is_daytime: bool) -> DisplayCondition {
        DisplayCondition {
            condition_code: code,
            is_daytime,
        }
    }

    #[test]
    fn test_no_condition_is_fallback() {
        assert_eq!(resolve_background(None), FALLBACK);
        assert!(resolve_background(None).is_video());
    }

    #[test]
    fn test_unmapped_code_is_fallback() {
        for code in [4, 42, 100, -7] {
            assert_eq!(resolve_background(Some(&cond(code, true))), FALLBACK);
            assert_eq!(resolve_background(Some(&cond(code, false))), FALLBACK);
        }
    }

    #[test]
    fn test_clear_day_and_night_differ() {
        let day = resolve_background(Some(&cond(0, true)));
        let night = resolve_background(Some(&cond(0, false)));
        assert_eq!(day, CLEAR_DAY);
        assert_eq!(night, CLEAR_NIGHT);
        assert_ne!(day, night);
        assert_ne!(day, FALLBACK);
        assert_ne!(night, FALLBACK);
    }

    #[test]
    fn test_clouds_use_day_night_pair() {
        assert_eq!(resolve_background(Some(&cond(3, true))), CLOUDS_DAY);
        assert_eq!(resolve_background(Some(&cond(3, false))), CLOUDS_NIGHT);
    }

    #[test]
    fn test_single_assets_ignore_daytime() {
        for (code, asset) in [(95, THUNDERSTORM), (63, RAIN), (73, SNOW), (45, HAZE)] {
            assert_eq!(resolve_background(Some(&cond(code, true))), asset);
            assert_eq!(resolve_background(Some(&cond(code, false))), asset);
        }
    }

    #[test]
    fn test_synonym_groups() {
        assert_eq!(resolve_category(Some(WeatherCategory::Drizzle), true), RAIN);
        for category in [WeatherCategory::Mist, WeatherCategory::Smoke, WeatherCategory::Fog] {
            assert_eq!(resolve_category(Some(category), false), HAZE);
        }
    }

    #[test]
    fn test_every_category_has_an_entry() {
        for category in WeatherCategory::ALL {
            let entry = entry_for(category);
            assert_ne!(entry.pick(true), FALLBACK, "{category:?}");
            assert_ne!(entry.pick(false), FALLBACK, "{category:?}");
            assert_eq!(resolve_category(Some(category), true), entry.pick(true));
        }
    }

    #[test]
    fn test_only_fallback_is_video() {
        for category in WeatherCategory::ALL {
            for is_day in [true, false] {
                assert!(!resolve_category(Some(category), is_day).is_video());
            }
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let c = cond(2, true);
        assert_eq!(resolve_background(Some(&c)), resolve_background(Some(&c)));
    }
}
