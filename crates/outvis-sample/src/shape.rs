//! Named shapes of the sample tables.
//!
//! The sample tables ship one column per shape; a shape's [`Display`] form is
//! its column name.
//!
//! [`Display`]: std::fmt::Display

use std::str::FromStr;

/// Shape of the base ("valid") distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DistributionShape {
    #[display("normal")]
    Normal,
    #[display("asymmetrical")]
    Asymmetrical,
    #[display("bimodal")]
    Bimodal,
    #[display("sharp")]
    Sharp,
    #[display("flat")]
    Flat,
}

impl DistributionShape {
    pub const ALL: [DistributionShape; 5] = [
        DistributionShape::Normal,
        DistributionShape::Asymmetrical,
        DistributionShape::Bimodal,
        DistributionShape::Sharp,
        DistributionShape::Flat,
    ];

    /// Human readable name, e.g. `Asymmetrical`.
    #[must_use]
    pub fn title(self) -> String {
        title_case(&self.to_string())
    }
}

/// How many sides of the distribution the outliers sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Sides {
    #[display("1_side")]
    One,
    #[display("2_side")]
    Two,
}

/// Whether the outliers are packed together or spread out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Spread {
    #[display("centered")]
    Centered,
    #[display("dispersed")]
    Dispersed,
}

/// How far the outliers sit from the base distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Distance {
    #[display("extreme")]
    Extreme,
    #[display("close")]
    Close,
}

/// Shape of the outlier pool, e.g. `outlier_2_side_dispersed_close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("outlier_{sides}_{spread}_{distance}")]
pub struct OutlierShape {
    pub sides: Sides,
    pub spread: Spread,
    pub distance: Distance,
}

impl OutlierShape {
    /// Every outlier shape in table column order.
    pub fn all() -> impl Iterator<Item = OutlierShape> {
        [Sides::One, Sides::Two].into_iter().flat_map(|sides| {
            [Spread::Centered, Spread::Dispersed]
                .into_iter()
                .flat_map(move |spread| {
                    [Distance::Extreme, Distance::Close]
                        .into_iter()
                        .map(move |distance| OutlierShape {
                            sides,
                            spread,
                            distance,
                        })
                })
        })
    }

    /// Human readable name, e.g. `Outlier 1 Side Centered Extreme`.
    #[must_use]
    pub fn title(self) -> String {
        title_case(&self.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown {kind} shape '{input}'")]
pub struct ParseShapeError {
    pub kind: &'static str,
    pub input: String,
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for DistributionShape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|shape| shape.to_string() == normalized)
            .ok_or_else(|| ParseShapeError {
                kind: "distribution",
                input: s.to_owned(),
            })
    }
}

impl FromStr for OutlierShape {
    type Err = ParseShapeError;

    /// Accepts the column name, its title, or the name without the `outlier_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        let normalized = normalized
            .strip_prefix("outlier_")
            .unwrap_or(&normalized);
        Self::all()
            .find(|shape| shape.to_string()["outlier_".len()..] == *normalized)
            .ok_or_else(|| ParseShapeError {
                kind: "outlier",
                input: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_shape_names() {
        let names = DistributionShape::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(names, ["normal", "asymmetrical", "bimodal", "sharp", "flat"]);
        assert_eq!(DistributionShape::Bimodal.title(), "Bimodal");
        assert_eq!("Sharp".parse::<DistributionShape>().unwrap(), DistributionShape::Sharp);
        assert!("uniform".parse::<DistributionShape>().is_err());
    }

    #[test]
    fn test_outlier_shape_columns() {
        let names = OutlierShape::all().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "outlier_1_side_centered_extreme",
                "outlier_1_side_centered_close",
                "outlier_1_side_dispersed_extreme",
                "outlier_1_side_dispersed_close",
                "outlier_2_side_centered_extreme",
                "outlier_2_side_centered_close",
                "outlier_2_side_dispersed_extreme",
                "outlier_2_side_dispersed_close",
            ]
        );
    }

    #[test]
    fn test_outlier_shape_parsing() {
        let expected = OutlierShape {
            sides: Sides::Two,
            spread: Spread::Dispersed,
            distance: Distance::Close,
        };
        assert_eq!(
            "outlier_2_side_dispersed_close".parse::<OutlierShape>().unwrap(),
            expected
        );
        assert_eq!(
            "Outlier 2 Side Dispersed Close".parse::<OutlierShape>().unwrap(),
            expected
        );
        assert_eq!("2-side-dispersed-close".parse::<OutlierShape>().unwrap(), expected);
        let err = "outlier_3_side".parse::<OutlierShape>().unwrap_err();
        assert_eq!(err.to_string(), "unknown outlier shape 'outlier_3_side'");
    }

    #[test]
    fn test_titles_round_trip() {
        for shape in OutlierShape::all() {
            assert_eq!(shape.title().parse::<OutlierShape>().unwrap(), shape);
        }
        assert_eq!(
            OutlierShape::all().next().unwrap().title(),
            "Outlier 1 Side Centered Extreme"
        );
    }
}
