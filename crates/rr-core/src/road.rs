//! Roadway classes recognized by the routing graph.
//!
//! A way is routable only when its `highway` tag parses into a [`RoadClass`].
//! Footways, paths, construction sites and any value we do not know about are
//! left out of the graph entirely.  Among routable classes the main paved
//! roads traverse at their physical length; the remaining ones carry a
//! penalty multiplier so the search prefers classified roads without ever
//! refusing to use the others.

/// Multiplier applied to the main paved road classes.
pub const PAVED_MULTIPLIER: f64 = 1.0;

/// Multiplier applied to every other routable class.
pub const FALLBACK_MULTIPLIER: f64 = 1.5;

/// A routable OSM `highway` value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    Unclassified,
    LivingStreet,
    Road,
    Track,
    MotorwayLink,
    TrunkLink,
    PrimaryLink,
    SecondaryLink,
    TertiaryLink,
}

impl RoadClass {
    /// Parse a `highway` tag value.  Returns `None` for anything that is not
    /// drivable (or not known), which excludes the way from edge generation.
    pub fn from_highway(value: &str) -> Option<RoadClass> {
        let class = match value {
            "motorway"       => RoadClass::Motorway,
            "trunk"          => RoadClass::Trunk,
            "primary"        => RoadClass::Primary,
            "secondary"      => RoadClass::Secondary,
            "tertiary"       => RoadClass::Tertiary,
            "residential"    => RoadClass::Residential,
            "service"        => RoadClass::Service,
            "unclassified"   => RoadClass::Unclassified,
            "living_street"  => RoadClass::LivingStreet,
            "road"           => RoadClass::Road,
            "track"          => RoadClass::Track,
            "motorway_link"  => RoadClass::MotorwayLink,
            "trunk_link"     => RoadClass::TrunkLink,
            "primary_link"   => RoadClass::PrimaryLink,
            "secondary_link" => RoadClass::SecondaryLink,
            "tertiary_link"  => RoadClass::TertiaryLink,
            _ => return None,
        };
        Some(class)
    }

    /// Weight multiplier applied to the physical length of an edge.
    #[inline]
    pub fn multiplier(self) -> f64 {
        match self {
            RoadClass::Motorway
            | RoadClass::Trunk
            | RoadClass::Primary
            | RoadClass::Secondary
            | RoadClass::Tertiary
            | RoadClass::Residential
            | RoadClass::Service => PAVED_MULTIPLIER,
            _ => FALLBACK_MULTIPLIER,
        }
    }

    /// The `highway` tag value this class was parsed from.
    pub fn as_str(self) -> &'static str {
        match self {
            RoadClass::Motorway      => "motorway",
            RoadClass::Trunk         => "trunk",
            RoadClass::Primary       => "primary",
            RoadClass::Secondary     => "secondary",
            RoadClass::Tertiary      => "tertiary",
            RoadClass::Residential   => "residential",
            RoadClass::Service       => "service",
            RoadClass::Unclassified  => "unclassified",
            RoadClass::LivingStreet  => "living_street",
            RoadClass::Road          => "road",
            RoadClass::Track         => "track",
            RoadClass::MotorwayLink  => "motorway_link",
            RoadClass::TrunkLink     => "trunk_link",
            RoadClass::PrimaryLink   => "primary_link",
            RoadClass::SecondaryLink => "secondary_link",
            RoadClass::TertiaryLink  => "tertiary_link",
        }
    }
}

impl std::fmt::Display for RoadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
