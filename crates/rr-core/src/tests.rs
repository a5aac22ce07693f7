//! Unit tests for rr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, NodeIdx, WayId};

    #[test]
    fn index_roundtrip() {
        let idx = NodeIdx(42);
        assert_eq!(idx.index(), 42);
        assert_eq!(NodeIdx::try_from(42usize).unwrap(), idx);
    }

    #[test]
    fn ordering() {
        assert!(NodeIdx(0) < NodeIdx(1));
        assert!(NodeId(-5) < NodeId(3));
        assert!(WayId(100) > WayId(99));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn index_beyond_u32_is_rejected() {
        let last = u32::MAX as usize;
        assert_eq!(NodeIdx::try_from(last).unwrap(), NodeIdx(u32::MAX));
        assert!(NodeIdx::try_from(last + 1).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(WayId::from(-3).to_string(), "WayId(-3)");
        assert_eq!(NodeIdx(2).to_string(), "NodeIdx(2)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(5.556, -0.197);
        assert!(p.distance_m(p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.195 km on a 6371 km sphere
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(5.55, -0.20);
        let b = GeoPoint::new(5.60, -0.15);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-6);
    }

    #[test]
    fn bbox_covers_radius() {
        let center = GeoPoint::new(60.0, 10.0);
        let (d_lat, d_lng) = center.bbox_half_extent_deg(1_000.0);
        // A point due east exactly 1 km away must fall inside the box.
        let east = GeoPoint::new(60.0, 10.0 + d_lng);
        assert!(center.distance_m(east) >= 1_000.0);
        let north = GeoPoint::new(60.0 + d_lat, 10.0);
        assert!((center.distance_m(north) - 1_000.0).abs() < 0.01);
    }

    #[test]
    fn bbox_saturates_at_pole() {
        let (_, d_lng) = GeoPoint::new(89.999, 0.0).bbox_half_extent_deg(5_000.0);
        assert_eq!(d_lng, 180.0);
    }
}

#[cfg(test)]
mod road {
    use rstest::rstest;

    use crate::RoadClass;

    #[rstest]
    #[case("motorway", 1.0)]
    #[case("trunk", 1.0)]
    #[case("primary", 1.0)]
    #[case("secondary", 1.0)]
    #[case("tertiary", 1.0)]
    #[case("residential", 1.0)]
    #[case("service", 1.0)]
    #[case("unclassified", 1.5)]
    #[case("living_street", 1.5)]
    #[case("primary_link", 1.5)]
    #[case("track", 1.5)]
    fn multiplier(#[case] highway: &str, #[case] expected: f64) {
        let class = RoadClass::from_highway(highway).unwrap();
        assert_eq!(class.multiplier(), expected);
        assert_eq!(class.as_str(), highway);
    }

    #[rstest]
    #[case("footway")]
    #[case("path")]
    #[case("cycleway")]
    #[case("steps")]
    #[case("construction")]
    #[case("")]
    #[case("Residential")]
    fn not_routable(#[case] highway: &str) {
        assert!(RoadClass::from_highway(highway).is_none());
    }
}
