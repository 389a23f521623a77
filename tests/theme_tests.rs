use blocknote::theme::{get_builtin_theme, list_builtin_themes};

#[test]
fn test_builtin_theme_names() {
    assert_eq!(
        list_builtin_themes(),
        vec!["default-dark", "default-light", "dracula", "gruvbox-dark", "nord"]
    );
}

#[test]
fn test_themes_distinguish_headings_from_text() {
    for name in list_builtin_themes() {
        let theme = get_builtin_theme(&name).unwrap();
        assert_eq!(theme.name, name);
        assert_ne!(theme.colors.heading, theme.colors.text, "{}", name);
    }
}

#[test]
fn test_unknown_theme() {
    assert!(get_builtin_theme("solarized").is_none());
}
