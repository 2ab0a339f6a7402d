//! # Calculator Registry
//!
//! An immutable, keyed collection of [`CalculatorDefinition`]s. A registry is
//! built once from a list of definitions, validated as a whole, and then only
//! read. The built-in catalogue is available process-wide through
//! [`Registry::builtin`], built lazily on first use.
//!
//! ## Usage
//!
//! ```rust
//! use calckit_core::category::Category;
//! use calckit_core::registry::Registry;
//!
//! let registry = Registry::builtin().unwrap();
//! let bmi = registry.get("bmi-calculator").unwrap();
//! assert_eq!(bmi.category, Category::Health);
//!
//! // Unknown slugs are a normal result, not an error
//! assert!(registry.get("no-such-calculator").is_none());
//! ```

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::catalog;
use crate::category::Category;
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::definition::CalculatorDefinition;
use crate::errors::{CatalogError, CatalogResult};
use crate::validation::validate_definition;

static BUILTIN: OnceCell<Registry> = OnceCell::new();

/// Read-only collection of calculator definitions keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<CalculatorDefinition>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// Build and validate a registry.
    ///
    /// The duplicate policy is applied first; only the definitions that end
    /// up registered are validated, so one replaced under `last-wins` cannot
    /// fail the build. Every remaining defect is collected before failing.
    pub fn build(definitions: Vec<CalculatorDefinition>, config: &RegistryConfig) -> CatalogResult<Self> {
        let mut registry = Registry::default();
        let mut errors = Vec::new();

        for definition in definitions {
            match registry.index.get(definition.id) {
                None => {
                    registry.index.insert(definition.id, registry.definitions.len());
                    registry.definitions.push(definition);
                }
                Some(&position) => match config.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        errors.push(CatalogError::duplicate_calculator(definition.id));
                    }
                    DuplicatePolicy::LastWins => {
                        warn!(id = definition.id, "replacing earlier calculator with the same identifier");
                        registry.definitions[position] = definition;
                    }
                },
            }
        }

        for definition in &registry.definitions {
            let report = validate_definition(definition);
            for warning in &report.warnings {
                if !config.strict {
                    warn!(code = warning.error_code(), "{}", warning);
                }
            }
            errors.extend(report.into_errors(config.strict));
        }

        if let Some(error) = CatalogError::from_many(errors) {
            return Err(error);
        }

        debug!(
            calculators = registry.len(),
            policy = %config.duplicate_policy,
            strict = config.strict,
            "registry built"
        );
        Ok(registry)
    }

    /// The built-in catalogue, built once with the default policy
    pub fn builtin() -> CatalogResult<&'static Registry> {
        BUILTIN.get_or_try_init(|| Registry::build(catalog::definitions(), &RegistryConfig::default()))
    }

    /// The built-in catalogue under a specific policy (not cached)
    pub fn builtin_with(config: &RegistryConfig) -> CatalogResult<Registry> {
        Registry::build(catalog::definitions(), config)
    }

    /// Look up a definition by identifier
    pub fn get(&self, id: &str) -> Option<&CalculatorDefinition> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    /// Definitions in registration order, optionally filtered by category
    pub fn list(&self, category: Option<Category>) -> Vec<&CalculatorDefinition> {
        self.definitions
            .iter()
            .filter(|d| category.map_or(true, |c| d.category == c))
            .collect()
    }

    /// Categories that have at least one calculator, in listing order
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| self.definitions.iter().any(|d| d.category == *c))
            .collect();
        categories.sort_by_key(|c| c.sort_order());
        categories
    }

    /// Identifiers in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.definitions.iter().map(|d| d.id).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalculatorDefinition> {
        self.definitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::field::InputField;
    use crate::output::{Formula, OutputField, OutputValue};
    use crate::snapshot::Snapshot;

    fn one(_: &Snapshot) -> OutputValue {
        OutputValue::Number(1.0)
    }

    fn two(_: &Snapshot) -> OutputValue {
        OutputValue::Number(2.0)
    }

    fn def(id: &'static str, category: Category, formula: Formula) -> CalculatorDefinition {
        CalculatorDefinition::new(id, id, category)
            .input(InputField::number("x", "X"))
            .output(OutputField::new("Out", formula))
    }

    fn duplicates() -> Vec<CalculatorDefinition> {
        vec![
            def("a", Category::Math, Formula::pure("one", &["x"], one)),
            def("b", Category::Finance, Formula::pure("one", &["x"], one)),
            def("a", Category::Math, Formula::pure("two", &["x"], two)),
        ]
    }

    #[test]
    fn test_duplicates_rejected_by_default() {
        let err = Registry::build(duplicates(), &RegistryConfig::default()).unwrap_err();
        assert_eq!(err, CatalogError::duplicate_calculator("a"));
    }

    #[test]
    fn test_last_wins_keeps_first_position() {
        let config = RegistryConfig {
            duplicate_policy: DuplicatePolicy::LastWins,
            strict: false,
        };
        let registry = Registry::build(duplicates(), &config).unwrap();
        assert_eq!(registry.ids(), vec!["a", "b"]);
        let a = registry.get("a").unwrap();
        assert_eq!(a.outputs[0].formula.name, "two");
    }

    #[test]
    fn test_last_wins_ignores_defects_of_replaced_definition() {
        let broken = CalculatorDefinition::new("a", "a", Category::Math).input(InputField::number("x", "X"));
        let definitions = vec![broken, def("a", Category::Math, Formula::pure("two", &["x"], two))];

        let config = RegistryConfig {
            duplicate_policy: DuplicatePolicy::LastWins,
            strict: false,
        };
        let registry = Registry::build(definitions.clone(), &config).unwrap();
        assert_eq!(registry.get("a").unwrap().outputs[0].formula.name, "two");

        // Rejecting keeps the first, broken definition, so both defects surface
        let err = Registry::build(definitions, &RegistryConfig::default()).unwrap_err();
        match err {
            CatalogError::InvalidCatalog { errors } => {
                let codes: Vec<_> = errors.iter().map(|e| e.error_code()).collect();
                assert_eq!(codes, vec!["DUPLICATE_CALCULATOR", "INVALID_DEFINITION"]);
            }
            other => panic!("expected InvalidCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_queries() {
        let registry = Registry::build(
            vec![
                def("b", Category::Finance, Formula::pure("one", &["x"], one)),
                def("a", Category::Math, Formula::pure("one", &["x"], one)),
            ],
            &RegistryConfig::default(),
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.list(Some(Category::Math)).len(), 1);
        assert_eq!(registry.list(None).len(), 2);
        assert_eq!(registry.categories(), vec![Category::Math, Category::Finance]);
    }

    #[test]
    fn test_all_defects_are_collected() {
        let broken = CalculatorDefinition::new("broken", "Broken", Category::Math)
            .input(InputField::number("x", "X"));
        let err = Registry::build(
            vec![broken, def("c", Category::Math, Formula::pure("one", &["y"], one))],
            &RegistryConfig::default(),
        )
        .unwrap_err();
        match err {
            CatalogError::InvalidCatalog { errors } => assert_eq!(errors.len(), 2),
            other => panic!("expected InvalidCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_promotes_warnings() {
        let hidden = CalculatorDefinition::new("hidden", "Hidden", Category::Math)
            .input(InputField::checkbox("on", "On"))
            .input(InputField::number("x", "X").visible_when(Condition::checked("on")))
            .output(OutputField::new("Out", Formula::pure("one", &["x"], one)));

        assert!(Registry::build(vec![hidden.clone()], &RegistryConfig::default()).is_ok());

        let strict = RegistryConfig {
            strict: true,
            ..RegistryConfig::default()
        };
        let err = Registry::build(vec![hidden], &strict).unwrap_err();
        assert_eq!(err.error_code(), "HIDDEN_VALUE_READ");
    }

    #[test]
    fn test_builtin_is_shared() {
        let first = Registry::builtin().unwrap();
        let second = Registry::builtin().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(!first.is_empty());
    }
}
