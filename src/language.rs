/// Returns the extension of a file name, leading dot included.
///
/// Everything from the last `.` onwards counts, so dot-files such as
/// `.astro` have the extension `.astro`. Names without a dot have none.
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|idx| &file_name[idx..])
}

/// Maps an extension (leading dot included, any case) to the fence tag
/// used for its code block.
pub fn language_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        ".astro" => "astro",
        ".ts" => "typescript",
        ".js" => "javascript",
        ".svelte" => "svelte",
        ".css" => "css",
        ".scss" => "scss",
        _ => "text",
    }
}

pub fn language_for_file(file_name: &str) -> &'static str {
    extension_of(file_name)
        .map(language_for_extension)
        .unwrap_or("text")
}
