use serde::de::DeserializeOwned;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Strict: a missing section yields `T::default()`, an invalid one is an error
/// naming the module.
pub fn module_config_required<T>(provider: &dyn ConfigProvider, module_name: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    match provider.get_module_config(module_name) {
        Some(v) => serde_json::from_value::<T>(v.clone())
            .map_err(|e| anyhow::anyhow!("invalid {module_name} config: {e}")),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        url: String,
        #[serde(default)]
        size: u32,
    }

    struct MapProvider(HashMap<String, serde_json::Value>);

    impl ConfigProvider for MapProvider {
        fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
            self.0.get(module_name)
        }
    }

    fn provider(section: serde_json::Value) -> MapProvider {
        MapProvider(HashMap::from([("sample".to_string(), section)]))
    }

    #[test]
    fn missing_section_yields_default() {
        let p = MapProvider(HashMap::new());
        let cfg: Sample = module_config_required(&p, "sample").unwrap();
        assert_eq!(cfg, Sample::default());
    }

    #[test]
    fn present_section_is_parsed() {
        let p = provider(serde_json::json!({ "url": "http://x", "size": 3 }));
        let cfg: Sample = module_config_required(&p, "sample").unwrap();
        assert_eq!(cfg.url, "http://x");
        assert_eq!(cfg.size, 3);
    }

    #[test]
    fn invalid_section_is_an_error() {
        let p = provider(serde_json::json!({ "size": "not a number" }));
        let err = module_config_required::<Sample>(&p, "sample").unwrap_err();
        assert!(err.to_string().contains("invalid sample config"));
    }
}
