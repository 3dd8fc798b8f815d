/// Maps a set of keywords to the skill they select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub skill: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(skill: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            skill: skill.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }
}

/// Deterministic router that picks a skill by scanning lower-cased text
///
/// Rules are checked in order and the first one with a matching keyword
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRouter {
    rules: Vec<KeywordRule>,
}

impl KeywordRouter {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Returns the skill selected for `text`, or `None` when no keyword
    /// appears
    pub fn select(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&text))
            .map(|rule| rule.skill.as_str())
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new("clima", &["clima", "temperatura", "tiempo"]),
            KeywordRule::new(
                "pgp",
                &["pgp", "login", "ingresar", "acceder", "contraseña", "usuario"],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_question_selects_clima() {
        let router = KeywordRouter::default();
        assert_eq!(router.select("¿Cuál es el clima hoy?"), Some("clima"));
    }

    #[test]
    fn login_story_selects_pgp() {
        let router = KeywordRouter::default();
        assert_eq!(
            router.select("El usuario no puede ingresar con su contraseña"),
            Some("pgp")
        );
    }

    #[test]
    fn unrelated_text_selects_nothing() {
        let router = KeywordRouter::default();
        assert_eq!(router.select("Cuéntame un chiste"), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let router = KeywordRouter::default();
        assert_eq!(router.select("TEMPERATURA en Bogotá"), Some("clima"));
        assert_eq!(router.select("Validar LOGIN y CONTRASEÑA"), Some("pgp"));
    }

    #[test]
    fn earlier_rule_wins_when_both_match() {
        let router = KeywordRouter::default();
        assert_eq!(
            router.select("El usuario consulta el tiempo antes de ingresar"),
            Some("clima")
        );
    }

    #[test]
    fn custom_rules_are_lower_cased() {
        let router = KeywordRouter::new(vec![KeywordRule::new("billing", &["Factura"])]);
        assert_eq!(router.select("Enviar factura"), Some("billing"));
        assert_eq!(router.rules().len(), 1);
    }
}
