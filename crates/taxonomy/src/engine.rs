use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::cache::CorrectionCache;
use crate::config::TaxonomyConfig;
use crate::error::TaxonomyError;
use crate::model::NormalizedCourse;

/// Compiled taxonomy engine.
///
/// All tables are compiled once at construction and read-only afterwards, so
/// every operation is a pure function of its input and safe to call
/// concurrently.
pub struct Taxonomy {
    exact_fixes: HashMap<String, String>,
    substitutions: Vec<(Regex, String)>,
    rules: Vec<CompiledRule>,
    groupings: Vec<CompiledBucket>,
}

struct CompiledRule {
    matcher: Regex,
    normalized: String,
    category: String,
    subcategory: Option<String>,
}

struct CompiledBucket {
    name: String,
    keywords: Vec<String>,
}

impl Taxonomy {
    pub fn new(config: TaxonomyConfig) -> Result<Self, TaxonomyError> {
        config.validate()?;

        let exact_fixes = config
            .corrections
            .iter()
            .map(|c| (c.from.trim().to_lowercase(), c.to.clone()))
            .collect();

        let mut substitutions = Vec::with_capacity(config.substitutions.len());
        for s in &config.substitutions {
            let regex = compile(&s.pattern, "substitution")?;
            substitutions.push((regex, s.replacement.clone()));
        }

        let mut rules = Vec::with_capacity(config.rules.len());
        for r in &config.rules {
            rules.push(CompiledRule {
                matcher: compile(&r.pattern, &r.normalized)?,
                normalized: r.normalized.clone(),
                category: r.category.clone(),
                subcategory: r.subcategory.clone(),
            });
        }

        let groupings = config
            .groupings
            .iter()
            .map(|b| CompiledBucket {
                name: b.name.clone(),
                keywords: b.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        Ok(Self { exact_fixes, substitutions, rules, groupings })
    }

    /// Engine over the curated built-in table. The table is covered by tests,
    /// so compilation cannot fail at runtime.
    pub fn builtin() -> Self {
        Self::new(TaxonomyConfig::builtin()).expect("built-in taxonomy table must compile")
    }

    /// Repair an OCR-corrupted course name. Total: always returns a string.
    ///
    /// The exact-fix table (keyed by lowercased trimmed input) is consulted
    /// first; on miss the substitution chain runs in declared order.
    pub fn correct_ocr(&self, raw: &str) -> String {
        let key = raw.trim().to_lowercase();
        if let Some(fix) = self.exact_fixes.get(&key) {
            return fix.clone();
        }

        let mut text = raw.trim().to_string();
        for (regex, replacement) in &self.substitutions {
            if regex.is_match(&text) {
                text = regex.replace_all(&text, replacement.as_str()).into_owned();
            }
        }
        text
    }

    /// `correct_ocr` through an injected memoization collaborator.
    pub fn correct_ocr_cached(&self, raw: &str, cache: &mut dyn CorrectionCache) -> String {
        if let Some(hit) = cache.get(raw) {
            return hit;
        }
        let corrected = self.correct_ocr(raw);
        cache.set(raw, &corrected);
        corrected
    }

    /// Classify a raw course name: OCR repair, then first-match over the
    /// ordered rule table. No match falls back to a generic normalization
    /// under the "Outros" category. Never fails.
    pub fn classify(&self, raw: &str) -> NormalizedCourse {
        let corrected = self.correct_ocr(raw);

        for rule in &self.rules {
            if rule.matcher.is_match(&corrected) {
                return NormalizedCourse {
                    original: raw.to_string(),
                    normalized: rule.normalized.clone(),
                    category: rule.category.clone(),
                    subcategory: rule.subcategory.clone(),
                };
            }
        }

        NormalizedCourse {
            original: raw.to_string(),
            normalized: title_case(&corrected),
            category: "Outros".to_string(),
            subcategory: None,
        }
    }

    /// Coarse dashboard bucket: first grouping (in declared precedence) with
    /// any keyword contained in the corrected name wins.
    pub fn classify_grouping(&self, raw: &str) -> String {
        let corrected = self.correct_ocr(raw).to_lowercase();

        for bucket in &self.groupings {
            if bucket.keywords.iter().any(|k| corrected.contains(k.as_str())) {
                return bucket.name.clone();
            }
        }
        "Outros".to_string()
    }
}

fn compile(pattern: &str, rule: &str) -> Result<Regex, TaxonomyError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| TaxonomyError::InvalidPattern {
            rule: rule.to_string(),
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Generic fallback normalization: trim, collapse whitespace, title-case
/// each word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
