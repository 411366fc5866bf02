use std::fs;
use std::path::Path;

use tempfile::tempdir;
use xyz_harvest::{
    captions_from_filenames, captions_from_sidecars, count_images, harvest, CaptionSource,
};

const PNG_HEAD: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";
const JPEG_HEAD: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0\x01";

fn write(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, bytes).expect("write fixture");
}

#[test]
fn filename_mode_reads_image_names_recursively() {
    let root = tempdir().expect("root");
    write(&root.path().join("a man and his dog_01.jpg"), JPEG_HEAD);
    write(&root.path().join("dogs/a dog having a beer_12.jpg"), JPEG_HEAD);
    write(&root.path().join("notes_01.jpg"), b"not really a jpeg");
    write(&root.path().join("caption.txt"), b"ignored in filename mode\n");

    let captions = captions_from_filenames(root.path());
    assert_eq!(captions, vec!["a man and his dog", "a dog having a beer"]);
}

#[test]
fn detection_uses_content_not_extension() {
    let root = tempdir().expect("root");
    write(&root.path().join("photo_1.dat"), PNG_HEAD);
    write(&root.path().join("fake_2.png"), b"plain text");
    assert_eq!(count_images(root.path()), 1);
    assert_eq!(captions_from_filenames(root.path()), vec!["photo"]);
}

#[test]
fn sidecar_mode_reads_first_line_only() {
    let root = tempdir().expect("root");
    write(&root.path().join("001.txt"), b"a man climbing a wall  \nsecond line\n");
    write(
        &root.path().join("bearded-men/022.txt"),
        b"a close up photo of a bearded man\r\n",
    );
    write(&root.path().join("001.png"), PNG_HEAD);

    let captions = captions_from_sidecars(root.path());
    assert_eq!(
        captions,
        vec!["a man climbing a wall", "a close up photo of a bearded man"]
    );
}

#[cfg(unix)]
#[test]
fn unreadable_sidecar_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let root = tempdir().expect("root");
    write(&root.path().join("a.txt"), b"first caption\n");
    let locked = root.path().join("b.txt");
    write(&locked, b"locked caption\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");
    write(&root.path().join("c.txt"), b"third caption\n");

    let captions = captions_from_sidecars(root.path());
    // Running as root bypasses permission bits; both outcomes keep the others.
    assert!(captions.contains(&"first caption".to_string()));
    assert!(captions.contains(&"third caption".to_string()));
    assert!(captions.len() == 2 || captions.len() == 3);
}

#[test]
fn missing_root_yields_nothing() {
    let root = tempdir().expect("root");
    let absent = root.path().join("absent");
    assert_eq!(count_images(&absent), 0);
    assert!(harvest(&absent, CaptionSource::Sidecar).is_empty());
    assert!(harvest(&absent, CaptionSource::Filename).is_empty());
}
