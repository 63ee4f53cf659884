use mapgrab_capture::{build_import_args, Region};
use std::path::PathBuf;

#[test]
fn import_args_crop_the_tile_region() {
    let args = build_import_args(
        &Region::new(14, 96, 1030, 620),
        &PathBuf::from("/tmp/run/scr-07.png"),
    );

    let crop_pos = args.iter().position(|arg| arg == "-crop").unwrap();
    assert_eq!(args[crop_pos + 1], "1030x620+14+96");
    assert_eq!(args.last().map(String::as_str), Some("/tmp/run/scr-07.png"));
}

#[test]
fn import_args_grab_the_root_window_and_repage() {
    let args = build_import_args(&Region::new(0, 0, 10, 10), &PathBuf::from("scr-01.png"));

    let window_pos = args.iter().position(|arg| arg == "-window").unwrap();
    assert_eq!(args[window_pos + 1], "root");
    assert!(args.iter().any(|arg| arg == "+repage"));
}
