// PDF text-layer extraction

use lopdf::Document;

use super::ExtractionError;

/// Concatenate the text of every page in page order.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut text = String::new();
    // get_pages is keyed by page number, so iteration is already in order
    for page_number in doc.get_pages().into_keys() {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(|e| ExtractionError::Pdf(format!("page {}: {}", page_number, e)))?;
        text.push_str(&page_text);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_single_page() {
        let pdf = build_pdf(&["Newtons laws"]);
        let text = extract_text(&pdf).unwrap();
        assert!(text.contains("Newtons laws"));
    }

    #[test]
    fn test_pages_joined_without_separator() {
        let pdf = build_pdf(&["Chapter one", "Chapter two"]);
        let doc = Document::load_mem(&pdf).unwrap();
        let expected: String = doc
            .get_pages()
            .into_keys()
            .map(|page| doc.extract_text(&[page]).unwrap())
            .collect();

        assert_eq!(extract_text(&pdf).unwrap(), expected);
    }

    #[test]
    fn test_pages_in_order() {
        let pdf = build_pdf(&["Chapter one", "Chapter two", "Chapter three"]);
        let text = extract_text(&pdf).unwrap();

        let one = text.find("Chapter one").unwrap();
        let two = text.find("Chapter two").unwrap();
        let three = text.find("Chapter three").unwrap();
        assert!(one < two && two < three);
    }

    #[test]
    fn test_not_a_pdf() {
        let err = extract_text(b"hello world").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_text(b"").is_err());
    }
}
