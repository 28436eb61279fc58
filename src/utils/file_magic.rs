//! 按内容识别上传文件类型，不信任文件名

const PDF_MAGIC: &[u8] = b"%PDF-";

/// 内容以 `%PDF-` 开头才视为 PDF
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        assert!(is_pdf(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3"));
        assert!(!is_pdf(b"%PD"));
    }

    #[test]
    fn test_filename_is_irrelevant() {
        // 文本内容即使被命名为 .pdf 也不会被识别为 PDF
        assert!(!is_pdf(b"just some notes, saved as homework.pdf"));
        assert!(!is_pdf(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]));
    }

    #[test]
    fn test_empty_data() {
        assert!(!is_pdf(&[]));
    }
}
