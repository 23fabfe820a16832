use proptest::prelude::*;
use rules_context::memory::{
    BaseUrlGenerator, CurrentPathStack, IdentityTranslator, StaticSiteSettings,
};
use rules_context::{ContextMap, ContextProvider, CurrentPathContext, SiteContext};

fn keys(map: &ContextMap) -> Vec<(String, Vec<String>)> {
    map.iter()
        .map(|(name, value)| (name.clone(), value.payload().keys().cloned().collect()))
        .collect()
}

proptest! {
    #[test]
    fn current_path_is_idempotent_and_stable(path in "/[a-z0-9/]{0,24}") {
        let paths = CurrentPathStack::with_path(path.clone());
        let urls = BaseUrlGenerator::new("https://example.org").with_current_path(path.clone());
        let provider = CurrentPathContext::new(&paths, &urls, &IdentityTranslator);

        let first = provider.resolve_runtime().unwrap();
        let second = provider.resolve_runtime().unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let listed = provider.list_available().unwrap();
        prop_assert_eq!(keys(&listed), keys(&first));
        prop_assert_eq!(listed["current_path"].field("path"), Some(path.as_str()));
    }

    #[test]
    fn site_is_idempotent_and_stable(
        name in "[A-Za-z ]{0,16}",
        slogan in proptest::option::of("[A-Za-z ]{0,16}"),
        mail in "[a-z]{1,8}@[a-z]{1,8}\\.test",
    ) {
        let mut pairs = vec![("name", name.clone()), ("mail", mail)];
        if let Some(slogan) = slogan {
            pairs.push(("slogan", slogan));
        }
        let settings = StaticSiteSettings::from_pairs(pairs);
        let urls = BaseUrlGenerator::new("https://acme.test");
        let provider = SiteContext::new(&settings, &urls, &IdentityTranslator);

        let first = provider.resolve_runtime().unwrap();
        let second = provider.resolve_runtime().unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let listed = provider.list_available().unwrap();
        prop_assert_eq!(keys(&listed), keys(&first));
        prop_assert_eq!(listed["site"].field("name"), Some(name.as_str()));
    }
}
