use murmur::settings::SidebarSettings;

#[test]
fn the_library_links_and_its_defaults_normalize_cleanly() {
    assert_eq!(murmur::smoke_marker(), "murmur");

    let settings = SidebarSettings::default().normalized();
    assert!(!settings.team_name.is_empty());
    assert!(settings.sidebar_width.is_finite());
}
