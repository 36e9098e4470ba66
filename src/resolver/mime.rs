//! # Tabla de Tipos MIME
//! src/resolver/mime.rs
//!
//! Resolución de content-type por extensión contra una tabla estática.
//! Sin content sniffing: extensión desconocida (o ausente) cae al
//! genérico `application/octet-stream`.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Content-type para extensiones fuera de la tabla
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Tabla extensión → content-type. Cubre lo que el servidor se
/// compromete a etiquetar; todo lo demás es octet-stream.
static MIME_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("html", "text/html"),
        ("css", "text/css"),
        ("js", "application/javascript"),
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("swf", "application/x-shockwave-flash"),
        ("txt", "text/plain"),
    ])
});

/// Resuelve el content-type de un archivo por su extensión.
///
/// La comparación es case-insensitive (`.HTML` sirve igual que `.html`).
///
/// # Ejemplo
///
/// ```
/// use std::path::Path;
/// use file_server::resolver::mime;
///
/// assert_eq!(mime::content_type(Path::new("a/page.html")), "text/html");
/// assert_eq!(mime::content_type(Path::new("a/blob.bin")), "application/octet-stream");
/// ```
pub fn content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase())
        .and_then(|extension| MIME_TYPES.get(extension.as_str()).copied())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type(Path::new("page.html")), "text/html");
        assert_eq!(content_type(Path::new("splash.css")), "text/css");
        assert_eq!(content_type(Path::new("jquery-1.9.1.js")), "application/javascript");
        assert_eq!(content_type(Path::new("160313.jpg")), "image/jpeg");
        assert_eq!(content_type(Path::new("ef35c.jpeg")), "image/jpeg");
        assert_eq!(content_type(Path::new("logo.v2.png")), "image/png");
        assert_eq!(content_type(Path::new("pic_ask.gif")), "image/gif");
        assert_eq!(content_type(Path::new("b16261023.swf")), "application/x-shockwave-flash");
        assert_eq!(content_type(Path::new("notes.txt")), "text/plain");
    }

    #[test]
    fn test_unknown_extension_defaults() {
        assert_eq!(content_type(Path::new("data.bin")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type(Path::new("archive.tar.gz")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_no_extension_defaults() {
        assert_eq!(content_type(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type(Path::new("noext.")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(content_type(Path::new("PAGE.HTML")), "text/html");
        assert_eq!(content_type(Path::new("photo.JpG")), "image/jpeg");
    }

    #[test]
    fn test_double_dot_name() {
        // la extensión es lo que va después del último punto
        assert_eq!(content_type(Path::new("text..txt")), "text/plain");
    }
}
