/*!
 * Tests for file and folder utilities
 */

use std::path::{Path, PathBuf};
use subburn::file_utils::{FileManager, FileType};
use crate::common;

#[test]
fn test_detect_file_type_withKnownExtensions_shouldClassify() {
    assert_eq!(FileManager::detect_file_type(Path::new("a.mkv")), FileType::Video);
    assert_eq!(FileManager::detect_file_type(Path::new("a.MP4")), FileType::Video);
    assert_eq!(FileManager::detect_file_type(Path::new("a.wav")), FileType::Audio);
    assert_eq!(FileManager::detect_file_type(Path::new("a.srt")), FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(Path::new("a.txt")), FileType::Unknown);
    assert_eq!(FileManager::detect_file_type(Path::new("noext")), FileType::Unknown);
}

#[test]
fn test_generate_output_path_withLanguageTag_shouldInsertIt() {
    let path = FileManager::generate_output_path(
        Path::new("/media/movie.mkv"),
        Path::new("/out"),
        "es",
        "srt",
    );
    assert_eq!(path, PathBuf::from("/out/movie.es.srt"));
}

#[test]
fn test_generate_output_path_withVideoExtension_shouldKeepContainer() {
    let path = FileManager::generate_output_path(
        Path::new("movie.mkv"),
        Path::new("."),
        "en",
        "mkv",
    );
    assert_eq!(path, PathBuf::from("./movie.en.mkv"));
}

#[test]
fn test_find_video_files_withMixedTree_shouldReturnOnlyVideos() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "one.mkv", "x").unwrap();
    common::create_test_file(&dir, "two.mp4", "x").unwrap();
    common::create_test_file(&dir, "notes.txt", "x").unwrap();
    common::create_test_file(&dir, "audio.mp3", "x").unwrap();

    std::fs::create_dir(dir.join("nested")).unwrap();
    common::create_test_file(&dir.join("nested"), "three.webm", "x").unwrap();

    let files = FileManager::find_video_files(&dir).unwrap();
    let names: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    assert_eq!(files.len(), 3);
    assert!(names.contains(&"one.mkv".to_string()));
    assert!(names.contains(&"two.mp4".to_string()));
    assert!(names.contains(&"three.webm".to_string()));
}

#[test]
fn test_ensure_dir_withMissingPath_shouldCreateIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("c");

    assert!(!FileManager::dir_exists(&nested));
    FileManager::ensure_dir(&nested).unwrap();
    assert!(FileManager::dir_exists(&nested));

    // Idempotent on an existing directory
    FileManager::ensure_dir(&nested).unwrap();
}

#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("deep").join("file.txt");

    FileManager::write_to_file(&path, "content").unwrap();
    assert_eq!(FileManager::read_to_string(&path).unwrap(), "content");
}

#[test]
fn test_remove_if_exists_withMissingFile_shouldNotPanic() {
    FileManager::remove_if_exists(Path::new("/definitely/not/here.tmp"));

    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "gone.tmp", "x").unwrap();
    FileManager::remove_if_exists(&path);
    assert!(!path.exists());
}
