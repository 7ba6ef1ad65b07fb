use board_client::ImageBlob;

/// Собирает изображение из выбранного в браузере файла.
///
/// Браузер не всегда знает MIME-тип файла; тогда он угадывается по расширению.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn image_blob(file_name: String, browser_type: String, bytes: Vec<u8>) -> ImageBlob {
    let content_type = if browser_type.trim().is_empty() {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    } else {
        browser_type
    };

    ImageBlob {
        file_name,
        content_type,
        bytes,
    }
}
