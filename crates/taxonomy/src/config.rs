use serde::Deserialize;

use crate::error::TaxonomyError;

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Exact-match OCR fix, keyed by the lowercased trimmed input.
#[derive(Debug, Clone, Deserialize)]
pub struct ExactCorrection {
    pub from: String,
    pub to: String,
}

/// One step of the ordered substitution chain. Each step is independently
/// idempotent (the replacement never re-matches the pattern), but the chain
/// is order-sensitive: later rules may depend on text produced by earlier
/// ones.
#[derive(Debug, Clone, Deserialize)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
}

/// Classification rule. Declaration order encodes precedence: the first
/// matching rule wins.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRule {
    pub pattern: String,
    pub normalized: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
}

/// Coarse dashboard bucket. Declaration order encodes precedence: the first
/// bucket with any keyword contained in the corrected name wins.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupingBucket {
    pub name: String,
    pub keywords: Vec<String>,
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyConfig {
    #[serde(default)]
    pub corrections: Vec<ExactCorrection>,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    pub rules: Vec<CourseRule>,
    pub groupings: Vec<GroupingBucket>,
}

impl TaxonomyConfig {
    pub fn from_toml(input: &str) -> Result<Self, TaxonomyError> {
        let config: TaxonomyConfig =
            toml::from_str(input).map_err(|e| TaxonomyError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TaxonomyError> {
        if self.rules.is_empty() {
            return Err(TaxonomyError::ConfigValidation(
                "at least one course rule is required".into(),
            ));
        }

        for correction in &self.corrections {
            if correction.from.trim().is_empty() {
                return Err(TaxonomyError::ConfigValidation(
                    "exact correction with empty 'from'".into(),
                ));
            }
        }

        for rule in &self.rules {
            if rule.normalized.trim().is_empty() || rule.category.trim().is_empty() {
                return Err(TaxonomyError::ConfigValidation(format!(
                    "rule '{}': normalized name and category must be non-empty",
                    rule.pattern
                )));
            }
        }

        for bucket in &self.groupings {
            if bucket.name.trim().is_empty() {
                return Err(TaxonomyError::ConfigValidation(
                    "grouping bucket with empty name".into(),
                ));
            }
            if bucket.keywords.is_empty() {
                return Err(TaxonomyError::ConfigValidation(format!(
                    "grouping '{}': keyword set must be non-empty",
                    bucket.name
                )));
            }
        }

        Ok(())
    }

    /// The curated built-in table.
    ///
    /// Corrections come from the reviewed OCR dataset of the legacy extract;
    /// rule and grouping order below is the documented precedence and must
    /// not be reordered casually.
    pub fn builtin() -> Self {
        fn fix(from: &str, to: &str) -> ExactCorrection {
            ExactCorrection { from: from.into(), to: to.into() }
        }
        fn sub(pattern: &str, replacement: &str) -> Substitution {
            Substitution { pattern: pattern.into(), replacement: replacement.into() }
        }
        fn rule(pattern: &str, normalized: &str, category: &str, sub: Option<&str>) -> CourseRule {
            CourseRule {
                pattern: pattern.into(),
                normalized: normalized.into(),
                category: category.into(),
                subcategory: sub.map(|s| s.to_string()),
            }
        }
        fn bucket(name: &str, keywords: &[&str]) -> GroupingBucket {
            GroupingBucket {
                name: name.into(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }

        TaxonomyConfig {
            corrections: vec![
                fix("iforáica básica", "Informática Básica"),
                fix("ifnormática básica", "Informática Básica"),
                fix("infomática básica", "Informática Básica"),
                fix("lógica de programaçao", "Lógica de Programação"),
                fix("lóg1ca de programação", "Lógica de Programação"),
                fix("exel básico", "Excel Básico"),
                fix("pyhon", "Python"),
                fix("pyho", "Python"),
                fix("segurança da informaçao", "Segurança da Informação"),
                fix("robótlca", "Robótica"),
                fix("desing gráfico", "Design Gráfico"),
            ],
            substitutions: vec![
                // Corrupted word fragments first, then accent repairs that
                // later rules rely on.
                sub(r"\bpyhon\b|\bpyho\b|\bphyton\b", "Python"),
                sub(r"\biforáica\b|\bifnormática\b|\binfomática\b|\blnformática\b", "Informática"),
                sub(r"\bexel\b|\bexcell\b", "Excel"),
                sub(r"\bdesing\b", "Design"),
                sub(r"\blóg1ca\b|\blog1ca\b", "Lógica"),
                sub(r"\brobótlca\b", "Robótica"),
                sub(r"\bbáslca\b|\bbasíca\b", "Básica"),
                sub(r"\bprogramaçao\b|\bprogramacao\b", "Programação"),
                sub(r"\binformaçao\b|\binformacao\b", "Informação"),
                sub(r"\bc1bersegurança\b|\bclbersegurança\b", "Cibersegurança"),
            ],
            rules: vec![
                rule("informática básica|informatica basica|introdução à informática", "Informática Básica", "Informática Básica", None),
                rule("pacote office|office", "Pacote Office", "Informática Básica", Some("Office")),
                rule("digitação|digitacao", "Digitação", "Informática Básica", None),
                rule("excel avançado|excel avancado", "Excel Avançado", "Análise de Dados", Some("Planilhas")),
                rule("excel", "Excel Básico", "Informática Básica", Some("Planilhas")),
                // Programming rules are declared before design/web rules: a
                // name matching both sides classifies under the earlier rule.
                rule("python", "Python", "Lógica e Programação", Some("Linguagens")),
                rule("javascript", "JavaScript", "Lógica e Programação", Some("Linguagens")),
                rule(r"\bjava\b", "Java", "Lógica e Programação", Some("Linguagens")),
                rule("lógica de programação|logica de programacao", "Lógica de Programação", "Lógica e Programação", None),
                rule("robótica|robotica", "Robótica", "Lógica e Programação", Some("Robótica")),
                rule("scratch", "Scratch", "Lógica e Programação", Some("Robótica")),
                rule("cibersegurança|ciberseguranca|segurança da informação|seguranca da informacao|segurança digital", "Segurança da Informação", "Cibersegurança", None),
                rule("power ?bi", "Power BI", "Análise de Dados", Some("Visualização")),
                rule("análise de dados|analise de dados|ciência de dados|ciencia de dados", "Análise de Dados", "Análise de Dados", None),
                rule("design gráfico|design grafico", "Design Gráfico", "Design e Web", Some("Design")),
                rule("canva", "Canva", "Design e Web", Some("Design")),
                rule(r"desenvolvimento web|\bhtml\b|\bcss\b", "Desenvolvimento Web", "Design e Web", Some("Web")),
                rule(r"\bux\b|experiência do usuário", "UX Design", "Design e Web", Some("Design")),
                rule("redes de computadores|redes", "Redes de Computadores", "Infraestrutura", Some("Redes")),
                rule("montagem e manutenção|manutenção de computadores|manutencao de computadores|hardware", "Montagem e Manutenção de Computadores", "Infraestrutura", Some("Hardware")),
                rule(r"\blinux\b", "Linux Essencial", "Infraestrutura", Some("Sistemas")),
                rule("marketing digital", "Marketing Digital", "Outros", None),
            ],
            groupings: vec![
                // Fixed dashboard precedence. A name hitting keywords from
                // more than one bucket lands in the earliest bucket.
                bucket("Informática Básica", &[
                    "informática", "informatica", "office", "word", "excel",
                    "digitação", "digitacao", "windows",
                ]),
                bucket("Lógica e Programação", &[
                    "python", "programação", "programacao", "lógica", "logica",
                    "java", "robótica", "robotica", "scratch",
                ]),
                bucket("Cibersegurança", &["segurança", "seguranca", "ciber"]),
                bucket("Análise de Dados", &[
                    "dados", "power bi", "estatística", "estatistica",
                ]),
                bucket("Design e Web", &["design", "web", "html", "css", "canva", "ux"]),
                bucket("Infraestrutura", &[
                    "redes", "hardware", "manutenção", "manutencao", "servidor", "linux",
                ]),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
