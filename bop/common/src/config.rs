/// The property name used by bracket clauses that do not name a property,
/// e.g. `[birch|oak]`
pub const DEFAULT_PROPERTY_NAME: &str = "variant";

/// Whether the host engine's compiled classes use their original names or the
/// minified names of a production build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolMode {
    #[default]
    Normal,
    Obfuscated,
}

impl SymbolMode {
    /// Converts the boolean the mod loader hands over before the first class is loaded
    pub fn from_host_flag(runtime_deobfuscation_enabled: bool) -> Self {
        if runtime_deobfuscation_enabled {
            SymbolMode::Obfuscated
        } else {
            SymbolMode::Normal
        }
    }

    pub fn is_obfuscated(self) -> bool {
        matches!(self, SymbolMode::Obfuscated)
    }
}

/// What the patcher does if the target method does not contain the
/// anticipated instruction pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPatternPolicy {
    /// Fail the class load, so that an incompatible engine version is noticed immediately
    #[default]
    Abort,
    /// Log a warning and hand the class back unmodified
    PassThrough,
}

/// Settings that are fixed before any query is parsed or any class is patched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub symbol_mode: SymbolMode,
    pub missing_pattern: MissingPatternPolicy,
    /// Property used by bracket clauses without an explicit name
    pub default_property: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            symbol_mode: SymbolMode::default(),
            missing_pattern: MissingPatternPolicy::default(),
            default_property: DEFAULT_PROPERTY_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn with_symbol_mode(mut self, symbol_mode: SymbolMode) -> Self {
        self.symbol_mode = symbol_mode;
        self
    }

    pub fn with_missing_pattern(mut self, policy: MissingPatternPolicy) -> Self {
        self.missing_pattern = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, MissingPatternPolicy, SymbolMode};

    #[test]
    fn host_flag_selects_symbol_mode() {
        assert_eq!(SymbolMode::from_host_flag(true), SymbolMode::Obfuscated);
        assert_eq!(SymbolMode::from_host_flag(false), SymbolMode::Normal);
    }

    #[test]
    fn defaults_fail_fast() {
        let config = Config::default();
        assert_eq!(config.missing_pattern, MissingPatternPolicy::Abort);
        assert_eq!(config.symbol_mode, SymbolMode::Normal);
        assert_eq!(config.default_property, "variant");
    }
}
