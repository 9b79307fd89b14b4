//! Route enumeration
//!
//! Exhaustive search up to three hops. Direct quotes consider every pool;
//! intermediate hops only use routable pools. Two-hop search scans the full
//! coin directory for a bridge token; three-hop search composes two-hop
//! routes with a final direct step.

use std::collections::HashMap;

use coin_registry::CoinRegistry;
use waypoint_core::CoinInfo;

use crate::catalog::PoolCatalog;
use crate::route::{TradeRoute, TradeStep};

// ---- Direct steps ----

/// All single-pool steps converting `x` to `y`, in both pool orientations.
/// Panics when asked to convert a coin to itself.
pub fn direct_steps(
    catalog: &PoolCatalog,
    x: &CoinInfo,
    y: &CoinInfo,
    require_routable: bool,
) -> Vec<TradeStep> {
    let x_full_name = x.full_name();
    let y_full_name = y.full_name();
    assert_ne!(x_full_name, y_full_name, "cannot swap same token");

    let mut steps = Vec::new();
    for pool in catalog.pools_touching(&x_full_name) {
        if require_routable && !pool.is_routable() {
            continue;
        }
        if pool.x_coin().full_name() == x_full_name && pool.y_coin().full_name() == y_full_name {
            steps.push(TradeStep::new(pool.clone(), true));
        } else if pool.y_coin().full_name() == x_full_name
            && pool.x_coin().full_name() == y_full_name
        {
            steps.push(TradeStep::new(pool.clone(), false));
        }
    }
    steps
}

/// Routable steps out of `x`, grouped by destination coin. Computed once per
/// query so the bridge-token scan does not re-walk `x`'s pool list for every
/// directory entry.
fn routable_steps_from(catalog: &PoolCatalog, x: &CoinInfo) -> HashMap<String, Vec<TradeStep>> {
    let x_full_name = x.full_name();
    let mut by_destination: HashMap<String, Vec<TradeStep>> = HashMap::new();
    for pool in catalog.pools_touching(&x_full_name) {
        if !pool.is_routable() {
            continue;
        }
        if pool.x_coin().full_name() == x_full_name {
            by_destination
                .entry(pool.y_coin().full_name())
                .or_default()
                .push(TradeStep::new(pool.clone(), true));
        } else if pool.y_coin().full_name() == x_full_name {
            by_destination
                .entry(pool.x_coin().full_name())
                .or_default()
                .push(TradeStep::new(pool.clone(), false));
        }
    }
    by_destination
}

// ---- Route tiers ----

pub fn one_step_routes(catalog: &PoolCatalog, x: &CoinInfo, y: &CoinInfo) -> Vec<TradeRoute> {
    direct_steps(catalog, x, y, false)
        .into_iter()
        .map(|step| TradeRoute::new(vec![step]))
        .collect()
}

pub fn two_step_routes(
    catalog: &PoolCatalog,
    registry: &CoinRegistry,
    x: &CoinInfo,
    y: &CoinInfo,
) -> Vec<TradeRoute> {
    let first_legs_by_bridge = routable_steps_from(catalog, x);
    bridged_routes(catalog, registry, &first_legs_by_bridge, &x.full_name(), y)
}

/// Two-step routes into `y` given the precomputed routable legs out of the
/// source, so the three-hop search reuses one adjacency for all its bridges.
fn bridged_routes(
    catalog: &PoolCatalog,
    registry: &CoinRegistry,
    first_legs_by_bridge: &HashMap<String, Vec<TradeStep>>,
    x_full_name: &str,
    y: &CoinInfo,
) -> Vec<TradeRoute> {
    let y_full_name = y.full_name();

    let mut routes = Vec::new();
    for bridge in registry.all() {
        let bridge_full_name = bridge.full_name();
        if bridge_full_name == x_full_name || bridge_full_name == y_full_name {
            continue;
        }
        let Some(first_legs) = first_legs_by_bridge.get(&bridge_full_name) else {
            continue;
        };
        let second_legs = direct_steps(catalog, bridge, y, true);
        if second_legs.is_empty() {
            continue;
        }
        for first in first_legs {
            for second in &second_legs {
                routes.push(TradeRoute::new(vec![first.clone(), second.clone()]));
            }
        }
    }
    routes
}

pub fn three_step_routes(
    catalog: &PoolCatalog,
    registry: &CoinRegistry,
    x: &CoinInfo,
    y: &CoinInfo,
) -> Vec<TradeRoute> {
    let x_full_name = x.full_name();
    let y_full_name = y.full_name();
    let first_legs_by_bridge = routable_steps_from(catalog, x);

    let mut routes = Vec::new();
    for bridge in registry.all() {
        let bridge_full_name = bridge.full_name();
        if bridge_full_name == x_full_name || bridge_full_name == y_full_name {
            continue;
        }
        let prefixes = bridged_routes(
            catalog,
            registry,
            &first_legs_by_bridge,
            &x_full_name,
            bridge,
        );
        if prefixes.is_empty() {
            continue;
        }
        let last_legs = direct_steps(catalog, bridge, y, true);
        if last_legs.is_empty() {
            continue;
        }
        for prefix in &prefixes {
            for last in &last_legs {
                routes.push(TradeRoute::new(vec![
                    prefix.steps()[0].clone(),
                    prefix.steps()[1].clone(),
                    last.clone(),
                ]));
            }
        }
    }
    routes
}

/// All routes up to `max_steps` hops, shortest tier first. Routes revisiting
/// a coin are dropped unless `allow_round_trip` is set.
pub fn all_routes(
    catalog: &PoolCatalog,
    registry: &CoinRegistry,
    x: &CoinInfo,
    y: &CoinInfo,
    max_steps: usize,
    allow_round_trip: bool,
) -> Vec<TradeRoute> {
    let mut routes = Vec::new();
    if max_steps >= 1 {
        routes.extend(one_step_routes(catalog, x, y));
    }
    if max_steps >= 2 {
        routes.extend(two_step_routes(catalog, registry, x, y));
    }
    if max_steps >= 3 {
        routes.extend(three_step_routes(catalog, registry, x, y));
    }
    if !allow_round_trip {
        routes.retain(|route| !route.has_round_trip());
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{anime_pool_value, aux_pool_value, coin, registry_with};

    fn coins() -> (CoinInfo, CoinInfo, CoinInfo) {
        (
            coin("X", "0x1::x::X"),
            coin("Y", "0x1::y::Y"),
            coin("Z", "0x1::z::Z"),
        )
    }

    #[test]
    fn test_two_pool_chain_yields_one_two_step_route() {
        // Pools X<->Y and Y<->Z: exactly one route from X to Z, via Y
        let (x, y, z) = coins();
        let registry = registry_with(&[&x, &y, &z]);
        let catalog = PoolCatalog::from_pools(vec![
            anime_pool_value(x.clone(), y.clone(), 1000, 1000),
            anime_pool_value(y.clone(), z.clone(), 1000, 1000),
        ]);
        let routes = all_routes(&catalog, &registry, &x, &z, 3, false);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].steps().len(), 2);
        assert_eq!(routes[0].tokens()[1].symbol, "Y");
    }

    #[test]
    fn test_direct_steps_cover_both_orientations() {
        let (x, y, _) = coins();
        let catalog = PoolCatalog::from_pools(vec![
            anime_pool_value(x.clone(), y.clone(), 1000, 1000),
            anime_pool_value(y.clone(), x.clone(), 1000, 1000),
        ]);
        let steps = direct_steps(&catalog, &x, &y, false);
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().any(|s| s.x_to_y));
        assert!(steps.iter().any(|s| !s.x_to_y));
        for step in &steps {
            assert_eq!(step.input_coin().symbol, "X");
            assert_eq!(step.output_coin().symbol, "Y");
        }
    }

    #[test]
    #[should_panic(expected = "cannot swap same token")]
    fn test_same_token_panics() {
        let (x, _, _) = coins();
        let catalog = PoolCatalog::from_pools(vec![]);
        direct_steps(&catalog, &x, &x.clone(), false);
    }

    #[test]
    fn test_frozen_pool_excluded_from_bridging_only() {
        // Frozen Aux pool X<->Y: usable as a direct quote but not as a leg
        // of a longer route
        let (x, y, z) = coins();
        let registry = registry_with(&[&x, &y, &z]);
        let catalog = PoolCatalog::from_pools(vec![
            aux_pool_value(x.clone(), y.clone(), 1000, 1000, 20, true),
            anime_pool_value(y.clone(), z.clone(), 1000, 1000),
        ]);

        let direct = all_routes(&catalog, &registry, &x, &y, 3, false);
        assert_eq!(direct.len(), 1);

        let bridged = all_routes(&catalog, &registry, &x, &z, 3, false);
        assert!(bridged.is_empty());
    }

    #[test]
    fn test_three_step_route_found() {
        let (x, y, z) = coins();
        let w = coin("W", "0x1::w::W");
        let registry = registry_with(&[&x, &y, &z, &w]);
        let catalog = PoolCatalog::from_pools(vec![
            anime_pool_value(x.clone(), y.clone(), 1000, 1000),
            anime_pool_value(y.clone(), z.clone(), 1000, 1000),
            anime_pool_value(z.clone(), w.clone(), 1000, 1000),
        ]);
        let routes = all_routes(&catalog, &registry, &x, &w, 3, false);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].steps().len(), 3);

        // Capped at two hops there is no way through
        assert!(all_routes(&catalog, &registry, &x, &w, 2, false).is_empty());
    }

    #[test]
    fn test_three_step_routes_through_all_bridges() {
        // Two disjoint paths X-A-B-Y and X-C-B-Y share the final bridge B;
        // both must be found from one source adjacency
        let (x, y, _) = coins();
        let a = coin("A", "0x1::a::A");
        let b = coin("B", "0x1::b::B");
        let c = coin("C", "0x1::c::C");
        let registry = registry_with(&[&x, &a, &b, &c, &y]);
        let catalog = PoolCatalog::from_pools(vec![
            anime_pool_value(x.clone(), a.clone(), 1000, 1000),
            anime_pool_value(a.clone(), b.clone(), 1000, 1000),
            anime_pool_value(x.clone(), c.clone(), 1000, 1000),
            anime_pool_value(c.clone(), b.clone(), 1000, 1000),
            anime_pool_value(b.clone(), y.clone(), 1000, 1000),
        ]);
        let routes = all_routes(&catalog, &registry, &x, &y, 3, false);
        assert_eq!(routes.len(), 2);
        for route in &routes {
            assert_eq!(route.steps().len(), 3);
            assert_eq!(route.tokens()[2].symbol, "B");
        }
    }

    #[test]
    fn test_round_trip_routes_dropped() {
        // Pools X<->Y, X<->Z, Y<->Z: the three-hop tier contains
        // X -> Z -> Y -> Z, which revisits Z and is dropped by default
        let (x, y, z) = coins();
        let registry = registry_with(&[&x, &y, &z]);
        let catalog = PoolCatalog::from_pools(vec![
            anime_pool_value(x.clone(), y.clone(), 1000, 1000),
            anime_pool_value(x.clone(), z.clone(), 1000, 1000),
            anime_pool_value(y.clone(), z.clone(), 1000, 1000),
        ]);
        let routes = all_routes(&catalog, &registry, &x, &z, 3, false);
        assert_eq!(routes.len(), 2);
        for route in &routes {
            assert!(!route.has_round_trip());
        }

        let with_round_trips = all_routes(&catalog, &registry, &x, &z, 3, true);
        assert_eq!(with_round_trips.len(), 3);
        assert!(with_round_trips.iter().any(|r| r.has_round_trip()));
    }

    #[test]
    fn test_tiers_ordered_shortest_first() {
        let (x, y, z) = coins();
        let registry = registry_with(&[&x, &y, &z]);
        let catalog = PoolCatalog::from_pools(vec![
            anime_pool_value(x.clone(), z.clone(), 1000, 1000),
            anime_pool_value(x.clone(), y.clone(), 1000, 1000),
            anime_pool_value(y.clone(), z.clone(), 1000, 1000),
        ]);
        let routes = all_routes(&catalog, &registry, &x, &z, 3, false);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].steps().len(), 1);
        assert_eq!(routes[1].steps().len(), 2);
    }
}
