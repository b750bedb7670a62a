//! Fixture builders for test suites.

/// Builds a single-page PDF that draws each line with Helvetica.
pub fn minimal_pdf(lines: &[&str]) -> Vec<u8> {
    multi_page_pdf(&[lines])
}

/// Builds a PDF with one page per entry. An empty entry yields a page with
/// no text. Object offsets in the xref table are computed so strict parsers
/// accept it.
pub fn multi_page_pdf(pages: &[&[&str]]) -> Vec<u8> {
    const FONT_ID: usize = 3;
    let first_page_id = FONT_ID + 1;

    let kids = (0..pages.len())
        .map(|index| format!("{} 0 R", first_page_id + index * 2))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (index, lines) in pages.iter().enumerate() {
        let content = page_content(lines);
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {FONT_ID} 0 R >> >> /Contents {} 0 R >>",
            first_page_id + index * 2 + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}

fn page_content(lines: &[&str]) -> String {
    let mut content = String::from("BT\n/F1 12 Tf\n72 720 Td\n");
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            content.push_str("0 -16 Td\n");
        }
        content.push_str(&format!("({}) Tj\n", escape_literal(line)));
    }
    content.push_str("ET\n");
    content
}

fn escape_literal(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for ch in line.chars() {
        if matches!(ch, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
