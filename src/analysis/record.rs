//! AnalysisRecord: the categorical summary of an agent document.
//!
//! Produced by a [`DocumentAnalyzer`](super::DocumentAnalyzer) and consumed
//! once by the baseline builder. Every categorical field is lenient: values
//! outside the declared set are kept as [`Categorical::Unrecognized`] and
//! resolved to a conservative default downstream instead of failing.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::baseline::Metric;
use crate::baseline::metric::normalize_key;

// =============================================================================
// Lenient Categorical Values
// =============================================================================

/// A closed set of categorical values for one analysis dimension
pub trait CategoryValue: Sized + Copy + Default {
    /// Human readable dimension name, used in rationales
    fn dimension() -> &'static str;

    /// Parse an already-normalized value (lowercase, underscores)
    fn try_parse(s: &str) -> Option<Self>;

    fn as_str(&self) -> &'static str;

    /// Catalog band this value selects
    fn band_key(&self) -> &'static str {
        self.as_str()
    }
}

/// A categorical field that tolerates unknown values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Categorical<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: CategoryValue> Categorical<T> {
    pub fn parse(raw: &str) -> Self {
        match T::try_parse(&normalize_key(raw)) {
            Some(value) => Self::Known(value),
            None => {
                tracing::debug!("Unrecognized {} value '{}'", T::dimension(), raw);
                Self::Unrecognized(raw.to_string())
            }
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unrecognized(_) => None,
        }
    }

    /// Known value, or the dimension's default when unrecognized
    pub fn or_default(&self) -> T {
        self.known().unwrap_or_default()
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(value) => value.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl<T: Default> Default for Categorical<T> {
    fn default() -> Self {
        Self::Known(T::default())
    }
}

impl<T> From<T> for Categorical<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: CategoryValue> fmt::Display for Categorical<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: CategoryValue> Serialize for Categorical<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: CategoryValue> Deserialize<'de> for Categorical<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string scalars and compound values degrade this field only
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Self::default(),
            serde_json::Value::String(raw) => Self::parse(&raw),
            other => {
                tracing::debug!("Non-string {} value {}", T::dimension(), other);
                Self::Unrecognized(other.to_string())
            }
        })
    }
}

macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $dimension:literal, default = $default:ident {
            $($variant:ident => $key:literal $(| $alias:literal)* => band $band:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl CategoryValue for $name {
            fn dimension() -> &'static str {
                $dimension
            }

            fn try_parse(s: &str) -> Option<Self> {
                match s {
                    $($key $(| $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            fn band_key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $band,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

category_enum! {
    /// Overall complexity of the agent's work
    ComplexityLevel, "complexity level", default = Complex {
        Simple => "simple" => band "simple",
        Complex => "complex" => band "complex",
        HighlySpecialized => "highly_specialized" | "specialized" => band "specialized",
    }
}

category_enum! {
    /// Maturity of the business domain the agent operates in
    DomainType, "domain maturity", default = Evolving {
        Stable => "stable" => band "stable",
        Evolving => "evolving" => band "evolving",
        New => "new" | "emerging" => band "new",
    }
}

category_enum! {
    ToolMaturity, "tool maturity", default = Experimental {
        WellDefined => "well_defined" | "mature" => band "well_defined",
        Experimental => "experimental" => band "experimental",
        Unstable => "unstable" => band "unstable",
    }
}

category_enum! {
    /// Complexity of the individual tasks or inquiries handled
    TaskComplexity, "task complexity", default = Complex {
        Simple => "simple" => band "simple",
        Complex => "complex" => band "complex",
        Novel => "novel" => band "novel",
    }
}

category_enum! {
    AutomationPotential, "automation potential", default = Medium {
        High => "high" | "high_automation" => band "high_automation",
        Medium => "medium" => band "medium",
        Low => "low" => band "low",
    }
}

category_enum! {
    /// How the agent relates to the existing process
    ScenarioType, "scenario type", default = Enhancement {
        Replacement => "replacement" => band "replacement",
        Enhancement => "enhancement" => band "enhancement",
        NewCapability => "new_capability" => band "new_capability",
    }
}

category_enum! {
    /// How strictly guardrails are enforced
    SafetyRequirements, "safety requirements", default = Moderate {
        Strict => "strict" => band "strict",
        Moderate => "moderate" => band "moderate",
        Lenient => "lenient" => band "lenient",
    }
}

// =============================================================================
// AnalysisRecord
// =============================================================================

/// Categorical summary of an agent's documentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    pub complexity_level: Categorical<ComplexityLevel>,
    pub domain_type: Categorical<DomainType>,
    pub tool_maturity: Categorical<ToolMaturity>,
    pub task_complexity: Categorical<TaskComplexity>,
    pub automation_potential: Categorical<AutomationPotential>,
    pub scenario_type: Categorical<ScenarioType>,

    /// Guardrail strictness; absent means "moderate" unless configured otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_requirements: Option<Categorical<SafetyRequirements>>,

    /// Metric name (or synonym) to raw documented target, e.g. `"<15%"`
    #[serde(deserialize_with = "deserialize_targets")]
    pub performance_targets: BTreeMap<String, String>,

    pub source_query: String,

    #[serde(deserialize_with = "deserialize_string_list")]
    pub agent_capabilities: Vec<String>,

    #[serde(deserialize_with = "deserialize_string_list")]
    pub technical_constraints: Vec<String>,

    #[serde(deserialize_with = "deserialize_string_list")]
    pub business_objectives: Vec<String>,

    /// Set when the record was synthesized because analysis failed
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl AnalysisRecord {
    /// Record with default categorical values for the given query
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            source_query: query.into(),
            ..Self::default()
        }
    }

    /// Conservative stand-in used when the analyzer could not produce a record
    pub fn degraded(query: impl Into<String>) -> Self {
        Self {
            complexity_level: ComplexityLevel::Complex.into(),
            domain_type: DomainType::Evolving.into(),
            tool_maturity: ToolMaturity::Experimental.into(),
            task_complexity: TaskComplexity::Complex.into(),
            automation_potential: AutomationPotential::Medium.into(),
            scenario_type: ScenarioType::Enhancement.into(),
            degraded: true,
            ..Self::for_query(query)
        }
    }

    pub fn with_target(mut self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.performance_targets.insert(key.into(), raw.into());
        self
    }

    /// Every documented target for a metric: canonical key first, then synonyms in order.
    pub fn target_candidates(&self, metric: Metric) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(metric.as_str())
            .chain(metric.synonyms().iter().copied())
            .filter_map(move |name| {
                self.performance_targets
                    .iter()
                    .find(|(key, _)| normalize_key(key) == name)
                    .map(|(_, raw)| raw.as_str())
            })
    }

    /// First documented target for a metric, parseable or not
    pub fn target_for(&self, metric: Metric) -> Option<&str> {
        self.target_candidates(metric).next()
    }

    /// Whether the originating query mentions technical work (case-insensitive)
    pub fn mentions(&self, marker: &str) -> bool {
        self.source_query
            .to_lowercase()
            .contains(&marker.to_lowercase())
    }
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

/// Accept targets as strings or bare numbers; drop anything else.
fn deserialize_targets<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    let mut targets = BTreeMap::new();

    for (key, value) in raw.unwrap_or_default() {
        match value {
            serde_json::Value::String(s) => {
                targets.insert(key, s);
            }
            serde_json::Value::Number(n) => {
                targets.insert(key, n.to_string());
            }
            serde_json::Value::Null => {}
            other => {
                tracing::debug!("Dropping non-scalar target for '{}': {}", key, other);
            }
        }
    }

    Ok(targets)
}

/// Accept a list of scalars, a single string, or null
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringListVisitor;

    impl<'de> Visitor<'de> for StringListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, a list of strings, or null")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut items = Vec::new();
            while let Some(value) = seq.next_element::<serde_json::Value>()? {
                match value {
                    serde_json::Value::String(s) => items.push(s),
                    serde_json::Value::Null => {}
                    other => items.push(other.to_string()),
                }
            }
            Ok(items)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringListVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_categorical_parse_normalizes() {
        assert_eq!(
            Categorical::<ComplexityLevel>::parse("Highly Specialized"),
            Categorical::Known(ComplexityLevel::HighlySpecialized)
        );
        assert_eq!(
            Categorical::<ToolMaturity>::parse("well-defined"),
            Categorical::Known(ToolMaturity::WellDefined)
        );
        let odd = Categorical::<DomainType>::parse("chaotic");
        assert!(odd.is_unrecognized());
        assert_eq!(odd.as_str(), "chaotic");
        assert_eq!(odd.or_default(), DomainType::Evolving);
    }

    #[test]
    fn test_band_keys() {
        assert_eq!(ComplexityLevel::HighlySpecialized.band_key(), "specialized");
        assert_eq!(AutomationPotential::High.band_key(), "high_automation");
        assert_eq!(ScenarioType::NewCapability.band_key(), "new_capability");
    }

    #[test]
    fn test_defaults_are_middle_values() {
        let record = AnalysisRecord::default();
        assert_eq!(record.complexity_level.known(), Some(ComplexityLevel::Complex));
        assert_eq!(record.domain_type.known(), Some(DomainType::Evolving));
        assert_eq!(record.tool_maturity.known(), Some(ToolMaturity::Experimental));
        assert_eq!(record.task_complexity.known(), Some(TaskComplexity::Complex));
        assert_eq!(record.automation_potential.known(), Some(AutomationPotential::Medium));
        assert_eq!(record.scenario_type.known(), Some(ScenarioType::Enhancement));
        assert!(record.safety_requirements.is_none());
        assert!(!record.degraded);
    }

    #[test]
    fn test_deserialize_lenient_record() {
        let value = json!({
            "complexity_level": "simple",
            "domain_type": "quantum",
            "tool_maturity": null,
            "performance_targets": {
                "first_contact_resolution": "75%",
                "roi": 3,
                "notes": ["ignored"]
            },
            "agent_capabilities": "answers billing questions",
            "technical_constraints": null,
            "business_objectives": ["reduce cost", 42]
        });

        let record: AnalysisRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.complexity_level.known(), Some(ComplexityLevel::Simple));
        assert!(record.domain_type.is_unrecognized());
        assert_eq!(record.tool_maturity.known(), Some(ToolMaturity::Experimental));
        assert_eq!(record.performance_targets.len(), 2);
        assert_eq!(record.performance_targets["roi"], "3");
        assert_eq!(record.agent_capabilities, vec!["answers billing questions"]);
        assert!(record.technical_constraints.is_empty());
        assert_eq!(record.business_objectives, vec!["reduce cost", "42"]);
    }

    #[test]
    fn test_serialize_as_plain_strings() {
        let record = AnalysisRecord::for_query("q").with_target("fcr", "80%");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["complexity_level"], "complex");
        assert_eq!(value["performance_targets"]["fcr"], "80%");
        assert!(value.get("safety_requirements").is_none());
        assert!(value.get("degraded").is_none());
    }

    #[test]
    fn test_target_lookup_prefers_canonical_key() {
        let record = AnalysisRecord::for_query("q")
            .with_target("escalation_rate", "<20%")
            .with_target("task_escalation_rate", "<15%");
        assert_eq!(record.target_for(Metric::TaskEscalationRate), Some("<15%"));

        let synonym_only = AnalysisRecord::for_query("q").with_target("CSAT", ">70%");
        assert_eq!(
            synonym_only.target_for(Metric::CustomerSatisfactionImprovement),
            Some(">70%")
        );
        assert_eq!(synonym_only.target_for(Metric::CostSavingsRoi), None);
    }

    #[test]
    fn test_target_candidates_in_lookup_order() {
        let record = AnalysisRecord::for_query("q")
            .with_target("First Contact Resolution", "high")
            .with_target("first-contact-resolution-rate", "80%")
            .with_target("FCR", "75%");

        let candidates: Vec<&str> = record
            .target_candidates(Metric::FirstContactResolution)
            .collect();
        assert_eq!(candidates, vec!["high", "75%", "80%"]);
        assert_eq!(record.target_for(Metric::FirstContactResolution), Some("high"));
    }

    #[test]
    fn test_non_string_category_degrades_only_that_field() {
        let value = json!({
            "complexity_level": 3,
            "tool_maturity": {"level": "stable"},
            "domain_type": "stable",
            "safety_requirements": true,
            "performance_targets": {"fcr": "75%"}
        });

        let record: AnalysisRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.complexity_level, Categorical::Unrecognized("3".to_string()));
        assert!(record.tool_maturity.is_unrecognized());
        assert_eq!(record.domain_type.known(), Some(DomainType::Stable));
        assert_eq!(
            record.safety_requirements,
            Some(Categorical::Unrecognized("true".to_string()))
        );
        assert_eq!(record.target_for(Metric::FirstContactResolution), Some("75%"));
    }

    #[test]
    fn test_degraded_record() {
        let record = AnalysisRecord::degraded("support agent");
        assert!(record.degraded);
        assert_eq!(record.source_query, "support agent");
        assert!(record.performance_targets.is_empty());
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        let record = AnalysisRecord::for_query("Agent for TECHNICAL support");
        assert!(record.mentions("technical"));
        assert!(!record.mentions("billing"));
    }
}
