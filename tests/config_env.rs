mod support;

use support::ruler_env::RulerEnvGuard;
use tempfile::tempdir;
use timeruler::app_dirs::APP_DIR_NAME;
use timeruler::config::{self, RulerSettings};
use timeruler::timecode::FrameRate;

#[test]
fn settings_round_trip_through_config_home() {
    let temp = tempdir().unwrap();
    let _env = RulerEnvGuard::set_config_home(temp.path().to_path_buf());

    assert_eq!(config::load_or_default().unwrap(), RulerSettings::default());

    let settings = RulerSettings {
        scale: 4.0,
        frame_rate: FrameRate::new(25, 1).unwrap(),
        host_bridge: true,
        ..RulerSettings::default()
    };
    config::save(&settings).unwrap();

    let path = config::config_path().unwrap();
    assert!(path.starts_with(temp.path().join(APP_DIR_NAME)));
    assert_eq!(config::load_or_default().unwrap(), settings);
}

#[test]
fn out_of_range_values_are_clamped_on_load() {
    let temp = tempdir().unwrap();
    let _env = RulerEnvGuard::set_config_home(temp.path().to_path_buf());
    let path = config::config_path().unwrap();
    std::fs::write(&path, "scale = -3.0\nmin_ruler_width = 99999.0\n").unwrap();

    let loaded = config::load_or_default().unwrap();
    assert!(loaded.scale > 0.0);
    assert_eq!(loaded.min_ruler_width, 32_767.0);
    assert_eq!(loaded.tick_pixels, RulerSettings::default().tick_pixels);
}
