use std::collections::HashMap;

use crate::config::RouteConfig;
use crate::error::ConfigError;

/// Подпись маршрута "Откуда-Куда" для логов и сообщений об ошибках.
///
/// Not a lookup key: station names may themselves contain `-`.
pub fn route_key(from: &str, to: &str) -> String {
    format!("{from}-{to}")
}

/// Неизменяемая таблица цен по маршрутам.
///
/// Every stored price is finite and strictly positive, so a missing entry is
/// the only way a lookup can fail.
#[derive(Debug, Clone, Default)]
pub struct RoutePrices {
    prices: HashMap<(String, String), f64>,
}

impl RoutePrices {
    pub fn new(routes: &[RouteConfig]) -> Result<Self, ConfigError> {
        let mut prices = HashMap::with_capacity(routes.len());

        for route in routes {
            let label = route_key(&route.from, &route.to);
            if route.from.is_empty() || route.to.is_empty() {
                return Err(ConfigError::MalformedRoute(label));
            }
            if !route.price.is_finite() || route.price <= 0.0 {
                return Err(ConfigError::InvalidPrice {
                    route: label,
                    price: route.price,
                });
            }
            let key = (route.from.clone(), route.to.clone());
            if prices.insert(key, route.price).is_some() {
                return Err(ConfigError::DuplicateRoute(label));
            }
        }

        Ok(Self { prices })
    }

    pub fn price(&self, from: &str, to: &str) -> Option<f64> {
        self.prices
            .get(&(from.to_owned(), to.to_owned()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str, f64)]) -> Result<RoutePrices, ConfigError> {
        let routes: Vec<RouteConfig> = entries
            .iter()
            .map(|(from, to, price)| RouteConfig::new(*from, *to, *price))
            .collect();
        RoutePrices::new(&routes)
    }

    #[test]
    fn looks_up_by_origin_and_destination() {
        let prices = table(&[("London", "France", 20.0)]).unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.price("London", "France"), Some(20.0));
        assert_eq!(prices.price("France", "London"), None);
    }

    #[test]
    fn rejects_zero_and_negative_prices() {
        for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                table(&[("London", "France", price)]),
                Err(ConfigError::InvalidPrice { .. })
            ));
        }
    }

    #[test]
    fn rejects_incomplete_and_repeated_routes() {
        assert!(matches!(
            table(&[("", "France", 10.0)]),
            Err(ConfigError::MalformedRoute(_))
        ));
        assert!(matches!(
            table(&[("London", "", 10.0)]),
            Err(ConfigError::MalformedRoute(_))
        ));
        assert!(matches!(
            table(&[("London", "France", 10.0), ("London", "France", 12.0)]),
            Err(ConfigError::DuplicateRoute(route)) if route == "London-France"
        ));
    }

    #[test]
    fn hyphenated_station_names_do_not_collide() {
        let only_one = table(&[("Paris-Nord", "Lille", 15.0)]).unwrap();
        assert_eq!(only_one.price("Paris-Nord", "Lille"), Some(15.0));
        assert_eq!(only_one.price("Paris", "Nord-Lille"), None);

        let both = table(&[("Paris-Nord", "Lille", 15.0), ("Paris", "Nord-Lille", 18.0)]).unwrap();
        assert_eq!(both.len(), 2);
        assert_eq!(both.price("Paris-Nord", "Lille"), Some(15.0));
        assert_eq!(both.price("Paris", "Nord-Lille"), Some(18.0));
    }
}
