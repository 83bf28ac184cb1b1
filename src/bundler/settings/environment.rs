//! Deployment environments the app can be packaged for.

/// Immutable description of one deployment target.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Environment {
    /// Identifier accepted by `--env`
    pub id: &'static str,
    /// App name handed to the packager; also prefixes output paths
    pub name: &'static str,
    /// URL the packaged app wraps
    pub url: &'static str,
}

/// Every known environment, in default build order.
pub static ENVIRONMENTS: [Environment; 3] = [
    Environment {
        id: "prod",
        name: "baidu-prod",
        url: "https://www.baidu.com/prod",
    },
    Environment {
        id: "uat",
        name: "baidu-uat",
        url: "https://www.baidu.com/uat",
    },
    Environment {
        id: "sit",
        name: "baidu-sit",
        url: "https://www.baidu.com/sit",
    },
];

impl Environment {
    /// Find an environment by identifier. Matching is exact.
    pub fn lookup(id: &str) -> Option<&'static Environment> {
        ENVIRONMENTS.iter().find(|env| env.id == id)
    }

    /// The default selection: all environments.
    pub fn all() -> Vec<&'static Environment> {
        ENVIRONMENTS.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Environment::lookup("sit").map(|e| e.name), Some("baidu-sit"));
        assert!(Environment::lookup("SIT").is_none());
        assert!(Environment::lookup(" sit").is_none());
    }

    #[test]
    fn default_order_is_prod_uat_sit() {
        let ids: Vec<_> = Environment::all().iter().map(|e| e.id).collect();
        assert_eq!(ids, ["prod", "uat", "sit"]);
    }
}
