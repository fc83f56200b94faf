//! Recipe image files on disk. Uploads land in the upload directory with a
//! thumbnail under `thumbnails/`; deleting a recipe removes both.

use std::path::Path;

/// Remove a recipe's image and its thumbnail. Missing files are fine; other
/// failures are logged and not propagated, the recipe row is gone either way.
pub fn delete_recipe_images(upload_dir: &Path, filename: &str) {
    for path in [
        upload_dir.join(filename),
        upload_dir.join("thumbnails").join(filename),
    ] {
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to delete image: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletes_image_and_thumbnail() {
        let dir = std::env::temp_dir().join(format!("skillet-img-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("thumbnails")).unwrap();
        std::fs::write(dir.join("a.jpg"), b"img").unwrap();
        std::fs::write(dir.join("thumbnails").join("a.jpg"), b"thumb").unwrap();

        delete_recipe_images(&dir, "a.jpg");

        assert!(!dir.join("a.jpg").exists());
        assert!(!dir.join("thumbnails").join("a.jpg").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_files_are_not_an_error() {
        let dir = std::env::temp_dir().join(format!("skillet-img-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        delete_recipe_images(&dir, "nope.jpg");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
