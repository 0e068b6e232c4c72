// End-to-end flows through the public session and image-pipeline API.

use std::sync::Arc;

use async_trait::async_trait;
use recetario::images::{spawn_loader, ImageEvent, ImageSource, LoadError};
use recetario::screen::{Reaction, Session};
use recetario::tui::state::{Focus, ImageSlot};
use recetario::tui::Command;

fn type_str(session: &mut Session, text: &str) {
    for c in text.chars() {
        session.apply(Command::Type(c));
    }
}

fn add_recipe(session: &mut Session, name: &str, url: &str) -> Reaction {
    session.apply(Command::SetFocus(Focus::NameInput));
    type_str(session, name);
    session.apply(Command::FocusNext);
    type_str(session, url);
    session.apply(Command::Submit)
}

#[test]
fn test_end_to_end_add_duplicate_remove() {
    let mut session = Session::new(8, 2);

    // Start empty.
    assert!(session.snapshot().rows.is_empty());

    // add("Tea", "https://t") succeeds, list shows 1 row.
    let reaction = add_recipe(&mut session, "Tea", "https://t");
    assert!(matches!(reaction, Reaction::StartLoad { .. }));
    let state = session.snapshot();
    assert_eq!(state.rows.len(), 1);
    assert_eq!(state.status, "Receta agregada.");

    // add("tea", "https://u") fails as a case-insensitive duplicate.
    let reaction = add_recipe(&mut session, "tea", "https://u");
    assert_eq!(reaction, Reaction::None);
    let state = session.snapshot();
    assert_eq!(state.rows.len(), 1);
    assert_eq!(state.status, "Esa receta ya existe.");

    // Tap the row: list empties, status names the removed recipe.
    let reaction = session.apply(Command::RemoveAt(0));
    assert_eq!(
        reaction,
        Reaction::CancelLoad {
            key: "tea".to_string()
        }
    );
    let state = session.snapshot();
    assert!(state.rows.is_empty());
    assert_eq!(state.status, "Eliminada: Tea");
}

#[test]
fn test_ordering_preserved_under_interleaved_add_remove() {
    let mut session = Session::new(8, 2);
    add_recipe(&mut session, "A", "https://a");
    add_recipe(&mut session, "B", "https://b");
    add_recipe(&mut session, "C", "https://c");

    session.apply(Command::RemoveAt(1));
    let names: Vec<String> = session
        .snapshot()
        .rows
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["A", "C"]);

    add_recipe(&mut session, "D", "https://d");
    let names: Vec<String> = session
        .snapshot()
        .rows
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["A", "C", "D"]);
}

#[test]
fn test_late_image_event_after_removal_is_dropped() {
    let mut session = Session::new(8, 2);
    add_recipe(&mut session, "Tea", "https://t");
    session.apply(Command::RemoveAt(0));

    let armed = session.on_image_event(ImageEvent::Failed {
        key: "tea".to_string(),
        message: "timeout".to_string(),
    });
    assert!(!armed);
    let state = session.snapshot();
    assert!(state.rows.is_empty());
    assert_eq!(state.notice, None);
}

struct StubSource {
    response: Result<Vec<u8>, ()>,
}

#[async_trait]
impl ImageSource for StubSource {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, LoadError> {
        match &self.response {
            Ok(bytes) => Ok(bytes.clone()),
            Err(()) => Err(LoadError::TooLarge(99)),
        }
    }
}

fn png_bytes() -> Vec<u8> {
    let mut img = image::RgbImage::new(8, 8);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb([10, 200, 30]);
    }
    let mut cursor = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

#[tokio::test]
async fn test_loader_resolves_slot_through_session() {
    let source = Arc::new(StubSource {
        response: Ok(png_bytes()),
    });
    let (tx, mut rx) = tokio::sync::mpsc::channel(1);

    let mut session = Session::new(4, 2);
    let reaction = add_recipe(&mut session, "Tea", "https://t");
    let Reaction::StartLoad { key, url } = reaction else {
        panic!("expected StartLoad, got {:?}", reaction);
    };

    spawn_loader(source, key, url, 4, 2, tx).await.unwrap();
    let event = rx.recv().await.unwrap();
    assert!(matches!(event, ImageEvent::Loaded { .. }));

    session.on_image_event(event);
    let state = session.snapshot();
    match &state.rows[0].slot {
        ImageSlot::Ready(thumbnail) => {
            assert_eq!(thumbnail.cols(), 4);
            assert_eq!(thumbnail.rows(), 2);
        }
        other => panic!("expected Ready slot, got {:?}", other),
    }
}

#[tokio::test]
async fn test_loader_reports_failure_with_message() {
    let source = Arc::new(StubSource { response: Err(()) });
    let (tx, mut rx) = tokio::sync::mpsc::channel(1);

    spawn_loader(source, "tea".to_string(), "https://t".to_string(), 4, 2, tx)
        .await
        .unwrap();

    match rx.recv().await.unwrap() {
        ImageEvent::Failed { key, message } => {
            assert_eq!(key, "tea");
            assert!(message.contains("99"));
        }
        other => panic!("expected Failed event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_aborted_loader_never_reports() {
    struct NeverSource;

    #[async_trait]
    impl ImageSource for NeverSource {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, LoadError> {
            std::future::pending().await
        }
    }

    let (tx, mut rx) = tokio::sync::mpsc::channel::<ImageEvent>(1);
    let handle = spawn_loader(
        Arc::new(NeverSource),
        "tea".to_string(),
        "https://t".to_string(),
        4,
        2,
        tx,
    );
    handle.abort();

    // The channel closes without any event having been sent.
    assert!(rx.recv().await.is_none());
}
