use serde::{Deserialize, Serialize};

/// Read access shared by everything that can be turned into a chat request.
pub trait PromptSource {
    fn context_text(&self) -> Option<&str>;
    fn prompt_text(&self) -> Option<&str>;
    fn prompt_kind(&self) -> Option<&str>;
}

/// A prompt as composed in the editor: the instruction, the code or text it
/// refers to, and the template kind it was built from.
///
/// Every field is optional and an empty string is a real value, distinct from
/// unset. The type is a plain value: change it with the consuming `with_*`
/// methods, or `set_*` when you own it exclusively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptDescriptor {
    #[serde(default, alias = "necessaryContextString", skip_serializing_if = "Option::is_none")]
    context_text: Option<String>,

    #[serde(default, alias = "prompt", skip_serializing_if = "Option::is_none")]
    prompt_text: Option<String>,

    #[serde(default, alias = "promptType", skip_serializing_if = "Option::is_none")]
    prompt_kind: Option<String>,
}

impl PromptDescriptor {
    pub fn new(
        context_text: Option<String>,
        prompt_text: Option<String>,
        prompt_kind: Option<String>,
    ) -> Self {
        Self {
            context_text,
            prompt_text,
            prompt_kind,
        }
    }

    pub fn context_text(&self) -> Option<&str> {
        self.context_text.as_deref()
    }

    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt_text.as_deref()
    }

    pub fn prompt_kind(&self) -> Option<&str> {
        self.prompt_kind.as_deref()
    }

    pub fn with_context_text(mut self, value: Option<String>) -> Self {
        self.context_text = value;
        self
    }

    pub fn with_prompt_text(mut self, value: Option<String>) -> Self {
        self.prompt_text = value;
        self
    }

    pub fn with_prompt_kind(mut self, value: Option<String>) -> Self {
        self.prompt_kind = value;
        self
    }

    pub fn set_context_text(&mut self, value: Option<String>) {
        self.context_text = value;
    }

    pub fn set_prompt_text(&mut self, value: Option<String>) {
        self.prompt_text = value;
    }

    pub fn set_prompt_kind(&mut self, value: Option<String>) {
        self.prompt_kind = value;
    }

    pub fn is_empty(&self) -> bool {
        self.context_text.is_none() && self.prompt_text.is_none() && self.prompt_kind.is_none()
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Option<String>, Option<String>) {
        (self.context_text, self.prompt_text, self.prompt_kind)
    }
}

impl PromptSource for PromptDescriptor {
    fn context_text(&self) -> Option<&str> {
        PromptDescriptor::context_text(self)
    }

    fn prompt_text(&self) -> Option<&str> {
        PromptDescriptor::prompt_text(self)
    }

    fn prompt_kind(&self) -> Option<&str> {
        PromptDescriptor::prompt_kind(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn default_has_every_field_unset() {
        let d = PromptDescriptor::default();
        assert_eq!(d.context_text(), None);
        assert_eq!(d.prompt_text(), None);
        assert_eq!(d.prompt_kind(), None);
        assert!(d.is_empty());
    }

    #[test]
    fn new_reads_back_what_it_was_given() {
        let cases = [
            (s("fn main() {}"), s("Explain this"), s("explain")),
            (s(""), s(""), s("")),
            (None, s("Only a prompt"), None),
            (s("ctx"), None, s("refactor")),
        ];
        for (context, prompt, kind) in cases {
            let d = PromptDescriptor::new(context.clone(), prompt.clone(), kind.clone());
            assert_eq!(d.context_text(), context.as_deref());
            assert_eq!(d.prompt_text(), prompt.as_deref());
            assert_eq!(d.prompt_kind(), kind.as_deref());
        }
    }

    #[test]
    fn with_replaces_only_its_own_field() {
        let base = PromptDescriptor::new(s("ctx"), s("prompt"), s("explain"));

        let d = base.clone().with_context_text(s("other ctx"));
        assert_eq!(d.context_text(), Some("other ctx"));
        assert_eq!(d.prompt_text(), Some("prompt"));
        assert_eq!(d.prompt_kind(), Some("explain"));

        let d = base.clone().with_prompt_text(None);
        assert_eq!(d.context_text(), Some("ctx"));
        assert_eq!(d.prompt_text(), None);
        assert_eq!(d.prompt_kind(), Some("explain"));

        let d = base.clone().with_prompt_kind(s(""));
        assert_eq!(d.context_text(), Some("ctx"));
        assert_eq!(d.prompt_text(), Some("prompt"));
        assert_eq!(d.prompt_kind(), Some(""));

        // the original is untouched
        assert_eq!(base.prompt_kind(), Some("explain"));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut d = PromptDescriptor::default();
        for value in [s("x"), s(""), None, s("multi\nline")] {
            d.set_context_text(value.clone());
            assert_eq!(d.context_text(), value.as_deref());
            d.set_prompt_text(value.clone());
            assert_eq!(d.prompt_text(), value.as_deref());
            d.set_prompt_kind(value.clone());
            assert_eq!(d.prompt_kind(), value.as_deref());
        }
    }

    #[test]
    fn setters_are_independent() {
        let mut d = PromptDescriptor::new(s("a"), s("b"), s("c"));
        d.set_prompt_text(s("B"));
        assert_eq!(d, PromptDescriptor::new(s("a"), s("B"), s("c")));
        d.set_context_text(None);
        assert_eq!(d, PromptDescriptor::new(None, s("B"), s("c")));
        d.set_prompt_kind(s("C"));
        assert_eq!(d, PromptDescriptor::new(None, s("B"), s("C")));
    }

    #[test]
    fn same_values_compare_equal() {
        let a = PromptDescriptor::new(s("ctx"), s("prompt"), s("kind"));
        let b = PromptDescriptor::new(s("ctx"), s("prompt"), s("kind"));
        assert_eq!(a, b);
        assert_ne!(a, b.with_prompt_kind(None));
    }

    #[test]
    fn empty_string_is_not_unset() {
        let d = PromptDescriptor::new(s(""), None, None);
        assert!(!d.is_empty());
        assert_ne!(d, PromptDescriptor::default());
    }

    #[test]
    fn trait_view_matches_inherent_accessors() {
        fn kind_of(source: &dyn PromptSource) -> Option<&str> {
            source.prompt_kind()
        }
        let d = PromptDescriptor::new(None, s("p"), s("test"));
        assert_eq!(kind_of(&d), Some("test"));
        assert_eq!(PromptSource::prompt_text(&d), Some("p"));
    }

    fn arb_field() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(any::<String>())
    }

    proptest! {
        #[test]
        fn prop_new_reads_back(a in arb_field(), b in arb_field(), c in arb_field()) {
            let d = PromptDescriptor::new(a.clone(), b.clone(), c.clone());
            prop_assert_eq!(d.context_text(), a.as_deref());
            prop_assert_eq!(d.prompt_text(), b.as_deref());
            prop_assert_eq!(d.prompt_kind(), c.as_deref());
        }

        #[test]
        fn prop_same_values_are_equal(a in arb_field(), b in arb_field(), c in arb_field()) {
            let left = PromptDescriptor::new(a.clone(), b.clone(), c.clone());
            let right = PromptDescriptor::new(a, b, c);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_with_replaces_one_field(
            a in arb_field(),
            b in arb_field(),
            c in arb_field(),
            v in arb_field(),
        ) {
            let base = PromptDescriptor::new(a.clone(), b.clone(), c.clone());

            let d = base.clone().with_context_text(v.clone());
            prop_assert_eq!(d, PromptDescriptor::new(v.clone(), b.clone(), c.clone()));

            let d = base.clone().with_prompt_text(v.clone());
            prop_assert_eq!(d, PromptDescriptor::new(a.clone(), v.clone(), c.clone()));

            let d = base.with_prompt_kind(v.clone());
            prop_assert_eq!(d, PromptDescriptor::new(a, b, v));
        }

        #[test]
        fn prop_set_then_get(
            a in arb_field(),
            b in arb_field(),
            c in arb_field(),
            v in arb_field(),
        ) {
            let mut d = PromptDescriptor::new(a.clone(), b.clone(), c.clone());
            d.set_context_text(v.clone());
            prop_assert_eq!(d.context_text(), v.as_deref());
            prop_assert_eq!(d.prompt_text(), b.as_deref());
            prop_assert_eq!(d.prompt_kind(), c.as_deref());

            let mut d = PromptDescriptor::new(a.clone(), b.clone(), c.clone());
            d.set_prompt_text(v.clone());
            prop_assert_eq!(d.context_text(), a.as_deref());
            prop_assert_eq!(d.prompt_text(), v.as_deref());
            prop_assert_eq!(d.prompt_kind(), c.as_deref());

            let mut d = PromptDescriptor::new(a.clone(), b.clone(), c);
            d.set_prompt_kind(v.clone());
            prop_assert_eq!(d.context_text(), a.as_deref());
            prop_assert_eq!(d.prompt_text(), b.as_deref());
            prop_assert_eq!(d.prompt_kind(), v.as_deref());
        }
    }
}
