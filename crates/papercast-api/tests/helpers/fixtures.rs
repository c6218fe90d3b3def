//! Test file fixtures.

/// A minimal but structurally valid PDF document.
pub fn create_test_pdf() -> Vec<u8> {
    b"%PDF-1.4\n\
1 0 obj\n\
<< /Type /Catalog /Pages 2 0 R >>\n\
endobj\n\
2 0 obj\n\
<< /Type /Pages /Kids [3 0 R] /Count 1 >>\n\
endobj\n\
3 0 obj\n\
<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>\n\
endobj\n\
xref\n\
0 4\n\
0000000000 65535 f \n\
0000000009 00000 n \n\
0000000058 00000 n \n\
0000000115 00000 n \n\
trailer\n\
<< /Size 4 /Root 1 0 R >>\n\
startxref\n\
190\n\
%%EOF\n"
        .to_vec()
}

/// A PDF padded with trailing bytes to the target length, for exercising
/// size limits.
pub fn create_padded_pdf(target_len: usize) -> Vec<u8> {
    let mut pdf = create_test_pdf();
    if pdf.len() < target_len {
        pdf.resize(target_len, b' ');
    }
    pdf
}
