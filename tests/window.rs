use reluctant_hero::window::*;

#[test]
fn default_frame_matches_the_window() {
    let cfg = WindowConfig::default();
    assert_eq!((cfg.physical_width, cfg.physical_height), (1280, 720));
    assert_eq!((cfg.logical_width, cfg.logical_height), (1280, 720));
    assert_eq!(cfg.mode, WindowMode::Windowed);
}

#[test]
fn partial_section_keeps_defaults() {
    let cfg: WindowConfig =
        serde_json::from_str(r#"{ "logical_width": 640, "mode": "borderless" }"#).unwrap();
    assert_eq!(cfg.logical_width, 640);
    assert_eq!(cfg.logical_height, 720);
    assert_eq!(cfg.physical_width, 1280);
    assert_eq!(cfg.mode, WindowMode::Borderless);
}

#[test]
fn modes_are_lowercase() {
    for (name, mode) in [
        ("windowed", WindowMode::Windowed),
        ("fullscreen", WindowMode::Fullscreen),
        ("borderless", WindowMode::Borderless),
    ] {
        let cfg: WindowConfig = serde_json::from_str(&format!(r#"{{ "mode": "{name}" }}"#)).unwrap();
        assert_eq!(cfg.mode, mode);
    }
}

#[test]
fn unknown_mode_is_rejected() {
    let res: Result<WindowConfig, _> = serde_json::from_str(r#"{ "mode": "maximised" }"#);
    assert!(res.is_err());
}
