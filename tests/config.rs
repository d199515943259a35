use anyhow::Result;
use camino::Utf8Path;
use std::io::Write;
use tempfile::NamedTempFile;
use topodraw::config::{Color, EditorConfig};
use topodraw::editor::{EditMode, EditorState, InputEvent, PointerButton};
use topodraw::geometry::Point;
use topodraw::surface::RetainedSurface;

fn write_config(text: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_config_file_overrides_defaults() -> Result<()> {
    let file = write_config(
        r##"{
            "node_radius": 25.0,
            "zoom_max": 8.0,
            "palette": { "router": "#ff0000", "background": "#000000" }
        }"##,
    )?;
    let path = Utf8Path::from_path(file.path()).expect("temp path is UTF-8");
    let cfg = EditorConfig::load(path)?;

    assert_eq!(cfg.node_radius, 25.0);
    assert_eq!(cfg.zoom_max, 8.0);
    assert_eq!(cfg.palette.router, Color::rgb(255, 0, 0));
    assert_eq!(cfg.palette.background, Color::rgb(0, 0, 0));
    let defaults = EditorConfig::default();
    assert_eq!(cfg.drag_threshold, defaults.drag_threshold);
    assert_eq!(cfg.palette.switch, defaults.palette.switch);
    Ok(())
}

#[test]
fn test_load_rejects_invalid_values() -> Result<()> {
    let file = write_config(r#"{ "zoom_min": 2.0, "zoom_max": 1.5 }"#)?;
    let path = Utf8Path::from_path(file.path()).expect("temp path is UTF-8");
    let err = EditorConfig::load(path).unwrap_err();
    assert!(format!("{err:#}").contains("zoom"), "unexpected error: {err:#}");
    Ok(())
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("absent.json")).unwrap();
    let err = EditorConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn test_editor_uses_loaded_config() -> Result<()> {
    let cfg = EditorConfig::from_json(r##"{ "node_radius": 30.0, "palette": { "router": "#123456" } }"##)?;
    let mut ed = EditorState::new(cfg, RetainedSurface::new());
    ed.set_mode(EditMode::PlaceRouter);
    let pos = Point::new(100.0, 100.0);
    ed.handle(InputEvent::Press { pos, button: PointerButton::Primary });
    ed.handle(InputEvent::Release { pos, button: PointerButton::Primary });

    let id = ed.selection().single_node().expect("placed");
    let node = ed.graph().node(id).expect("exists");
    assert_eq!(ed.graph().node_bounds(ed.surface(), id).unwrap().width(), 60.0);
    let shape = ed.surface().shape(node.shape).unwrap();
    assert_eq!(shape.style.fill, Some(Color::rgb(0x12, 0x34, 0x56)));
    Ok(())
}
