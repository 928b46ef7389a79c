use crate::modules::notify::ServiceEvent;

/// Name of the token substituted with the service type
pub const SERVICE_TYPE_TOKEN: &str = "serviceType";

/// Subject line pattern containing `<<name>>` tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTemplate(String);

impl SubjectTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Render the subject for one event.
    ///
    /// `<<serviceType>>` becomes `Refuse` or `Recycling`; any other token is
    /// left as it is.
    pub fn render(&self, event: &ServiceEvent) -> String {
        replace_tokens(
            &[(SERVICE_TYPE_TOKEN, event.service_type.as_word())],
            &self.0,
        )
    }
}

/// Wrap a token name in its delimiters
pub fn build_token(token_text: &str) -> String {
    format!("<<{}>>", token_text)
}

/// Replace each `<<token>>` with its value, one pair at a time and in order.
///
/// Every pair is applied once to the output of the previous pair. Values are
/// inserted verbatim, so a value that itself looks like a later token will be
/// replaced by that later pair.
pub fn replace_tokens(tokens_and_replacements: &[(&str, &str)], template_text: &str) -> String {
    tokens_and_replacements
        .iter()
        .fold(template_text.to_string(), |acc, (token, replacement)| {
            acc.replace(&build_token(token), replacement)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::notify::ServiceType;

    #[test]
    fn test_refuse_subject() {
        let template = SubjectTemplate::new("Collection reminder: <<serviceType>>");
        let subject = template.render(&ServiceEvent::new(ServiceType::Refuse));

        assert_eq!(subject, "Collection reminder: Refuse");
    }

    #[test]
    fn test_recycling_subject() {
        let template = SubjectTemplate::new("Collection reminder: <<serviceType>>");
        let subject = template.render(&ServiceEvent::new(ServiceType::Recycling));

        assert_eq!(subject, "Collection reminder: Recycling");
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let template = SubjectTemplate::new("<<serviceType>> day! Put the <<serviceType>> out");
        let subject = template.render(&ServiceEvent::new(ServiceType::Refuse));

        assert_eq!(subject, "Refuse day! Put the Refuse out");
    }

    #[test]
    fn test_template_without_tokens_is_unchanged() {
        let template = SubjectTemplate::new("Static subject");

        for service_type in [ServiceType::Refuse, ServiceType::Recycling] {
            assert_eq!(
                template.render(&ServiceEvent::new(service_type)),
                "Static subject"
            );
        }
        assert_eq!(
            replace_tokens(&[("a", "1"), ("b", "2")], "Static subject"),
            "Static subject"
        );
    }

    #[test]
    fn test_unknown_token_is_left_verbatim() {
        let template = SubjectTemplate::new("Hello <<unknown>>");
        let subject = template.render(&ServiceEvent::new(ServiceType::Refuse));

        assert_eq!(subject, "Hello <<unknown>>");
    }

    #[test]
    fn test_partial_delimiters_are_not_tokens() {
        let subject = replace_tokens(
            &[(SERVICE_TYPE_TOKEN, "Refuse")],
            "<serviceType> <<serviceType> serviceType>>",
        );

        assert_eq!(subject, "<serviceType> <<serviceType> serviceType>>");
    }

    #[test]
    fn test_substitution_is_a_single_ordered_pass() {
        // A value containing a later token gets replaced by that later pair
        assert_eq!(replace_tokens(&[("a", "<<b>>"), ("b", "x")], "<<a>>"), "x");

        // but one containing an earlier token does not
        assert_eq!(
            replace_tokens(&[("b", "x"), ("a", "<<b>>")], "<<a>>"),
            "<<b>>"
        );

        // and a value containing its own token is not expanded again
        assert_eq!(replace_tokens(&[("a", "<<a>>!")], "<<a>>"), "<<a>>!");
    }

    #[test]
    fn test_build_token() {
        assert_eq!(build_token("serviceType"), "<<serviceType>>");
    }
}
