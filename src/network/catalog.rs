//! Demo reference network: twenty Indian cities and a central hub.

use crate::models::Location;

use super::Graph;

/// Name of the designated distribution hub.
pub const HUB: &str = "Central Hub";

const LOCATIONS: [(&str, f64, f64); 21] = [
    ("New Delhi", 28.6139, 77.2090),
    ("Mumbai", 19.0760, 72.8777),
    ("Bangalore", 12.9716, 77.5946),
    ("Chennai", 13.0827, 80.2707),
    ("Kolkata", 22.5726, 88.3639),
    ("Hyderabad", 17.3850, 78.4867),
    ("Pune", 18.5204, 73.8567),
    ("Ahmedabad", 23.0225, 72.5714),
    ("Jaipur", 26.9124, 75.7873),
    ("Lucknow", 26.8467, 80.9462),
    ("Kanpur", 26.4499, 80.3319),
    ("Nagpur", 21.1458, 79.0882),
    ("Indore", 22.7196, 75.8577),
    ("Bhopal", 23.2599, 77.4126),
    ("Surat", 21.1702, 72.8311),
    ("Patna", 25.5941, 85.1376),
    ("Chandigarh", 30.7333, 76.7794),
    ("Kochi", 9.9312, 76.2673),
    ("Visakhapatnam", 17.6868, 83.2185),
    ("Vadodara", 22.3072, 73.1812),
    (HUB, 21.1000, 79.0500),
];

/// Two-way road links, km.
const ROADS: [(&str, &str, f64); 30] = [
    ("New Delhi", "Jaipur", 280.0),
    ("New Delhi", "Chandigarh", 245.0),
    ("New Delhi", "Lucknow", 555.0),
    ("Lucknow", "Kanpur", 90.0),
    ("Lucknow", "Patna", 530.0),
    ("Patna", "Kolkata", 580.0),
    ("Kanpur", "Bhopal", 520.0),
    ("Jaipur", "Ahmedabad", 670.0),
    ("Jaipur", "Indore", 600.0),
    ("Ahmedabad", "Vadodara", 110.0),
    ("Ahmedabad", "Indore", 390.0),
    ("Vadodara", "Surat", 150.0),
    ("Surat", "Mumbai", 285.0),
    ("Mumbai", "Pune", 150.0),
    ("Mumbai", "Indore", 590.0),
    ("Indore", "Bhopal", 195.0),
    ("Bhopal", "Nagpur", 350.0),
    ("Pune", "Hyderabad", 560.0),
    ("Pune", "Bangalore", 840.0),
    ("Nagpur", "Hyderabad", 500.0),
    ("Nagpur", HUB, 15.0),
    (HUB, "Bhopal", 355.0),
    (HUB, "Hyderabad", 505.0),
    ("Hyderabad", "Bangalore", 570.0),
    ("Hyderabad", "Visakhapatnam", 620.0),
    ("Visakhapatnam", "Kolkata", 880.0),
    ("Visakhapatnam", "Chennai", 800.0),
    ("Bangalore", "Chennai", 345.0),
    ("Bangalore", "Kochi", 550.0),
    ("Chennai", "Kochi", 690.0),
];

/// One-way links (toll expressways without a return carriageway).
const ONE_WAY: [(&str, &str, f64); 2] = [
    ("Chandigarh", "Jaipur", 520.0),
    ("Surat", "Pune", 420.0),
];

/// All catalog locations, hub last.
pub fn catalog() -> Vec<Location> {
    LOCATIONS
        .iter()
        .map(|&(name, lat, lng)| Location::new(name, lat, lng))
        .collect()
}

/// Looks up a catalog location by name.
pub fn find_location(name: &str) -> Option<Location> {
    LOCATIONS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|&(name, lat, lng)| Location::new(name, lat, lng))
}

/// The designated hub location.
pub fn hub() -> Location {
    find_location(HUB).unwrap_or_else(|| Location::new(HUB, 21.1, 79.05))
}

/// Builds the demo road network over the catalog.
///
/// Every catalog location is a node even if it has no roads.
pub fn demo_graph() -> Graph {
    let mut g = Graph::new();
    for (name, _, _) in LOCATIONS {
        g.add_node(name);
    }
    for (a, b, d) in ROADS {
        g.add_road(a, b, d);
    }
    for (from, to, d) in ONE_WAY {
        g.add_edge(from, to, d);
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::shortest_path;

    #[test]
    fn test_catalog_size() {
        let c = catalog();
        assert_eq!(c.len(), 21);
        assert_eq!(c.last().map(|l| l.name.as_str()), Some(HUB));
    }

    #[test]
    fn test_demo_graph_covers_catalog() {
        let g = demo_graph();
        assert_eq!(g.node_count(), 21);
        for loc in catalog() {
            assert!(g.contains(&loc.name), "{} missing", loc.name);
        }
        assert_eq!(g.edge_count(), ROADS.len() * 2 + ONE_WAY.len());
    }

    #[test]
    fn test_road_distances_exceed_great_circle() {
        for (a, b, d) in ROADS {
            let la = find_location(a).expect("catalog");
            let lb = find_location(b).expect("catalog");
            assert!(d >= la.distance_to(&lb), "{a} → {b}");
        }
    }

    #[test]
    fn test_delhi_to_jaipur() {
        let sp = shortest_path(&demo_graph(), "New Delhi", "Jaipur");
        assert_eq!(sp.distance, 280.0);
        assert_eq!(sp.path, vec!["New Delhi", "Jaipur"]);
    }

    #[test]
    fn test_one_way_link() {
        let g = demo_graph();
        let there = shortest_path(&g, "Surat", "Pune");
        let back = shortest_path(&g, "Pune", "Surat");
        assert_eq!(there.distance, 420.0);
        // Pune → Mumbai → Surat
        assert_eq!(back.distance, 435.0);
    }

    #[test]
    fn test_hub_reaches_every_city() {
        let g = demo_graph();
        for loc in catalog() {
            assert!(shortest_path(&g, HUB, &loc.name).is_reachable());
        }
    }

    #[test]
    fn test_hub_lookup() {
        assert_eq!(hub().name, HUB);
        assert!(find_location("Atlantis").is_none());
    }
}
