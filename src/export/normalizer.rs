use std::collections::HashMap;

use crate::domain::{ItemRecord, TraitRow};

pub fn normalize(rows: Vec<TraitRow>) -> Vec<ItemRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut items: Vec<ItemRecord> = Vec::new();

    for row in rows {
        let qid = item_qid(&row.item_uri);
        let slot = match index.get(qid) {
            Some(&slot) => slot,
            None => {
                // name e wikidata_xref ficam fixados pela primeira linha do item
                items.push(ItemRecord::new(
                    row.item_label.clone(),
                    qid,
                    row.wikidata_xref.clone(),
                ));
                index.insert(qid.to_string(), items.len() - 1);
                items.len() - 1
            }
        };

        let item = &mut items[slot];

        // primeira imagem não vazia vence, considerando todas as linhas do item
        if item.image_url.is_none() {
            if let Some(image) = row.image.as_deref().filter(|value| !value.is_empty()) {
                item.image_url = Some(image.to_string());
            }
        }

        // descritores duplicados colapsam para o valor da última linha
        item.traits
            .entry(row.property_label)
            .or_default()
            .insert(row.descriptor_label, row.value_label);
    }

    items.sort_by_key(|item| item.name.to_lowercase());
    items
}

fn item_qid(uri: &str) -> &str {
    let trimmed = uri.strip_suffix('/').unwrap_or(uri);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(uri: &str, name: &str, prop: &str, descriptor: &str, value: &str) -> TraitRow {
        TraitRow {
            item_uri: uri.to_string(),
            item_label: name.to_string(),
            property_label: prop.to_string(),
            descriptor_label: descriptor.to_string(),
            value_label: value.to_string(),
            image: None,
            wikidata_xref: None,
        }
    }

    #[test]
    fn extracts_qid_from_item_uri() {
        assert_eq!(item_qid("https://example.org/entity/Q42"), "Q42");
        assert_eq!(item_qid("https://example.org/entity/Q42/"), "Q42");
        assert_eq!(item_qid("Q42"), "Q42");
    }

    #[test]
    fn single_item_collapses_to_one_record() {
        let rows = vec![
            row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Oval"),
            row("https://x/entity/Q1/", "Ipê", "Folha", "Margem", "Inteira"),
            row("https://x/entity/Q1", "Ipê", "Fruto", "Tipo", "Cápsula"),
        ];

        let items = normalize(rows);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].wikibase, "Q1");
        assert_eq!(items[0].traits.len(), 2);
    }

    #[test]
    fn name_and_xref_come_from_first_row() {
        let mut first = row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Oval");
        first.wikidata_xref = Some("Q100".to_string());
        let mut second = row("https://x/entity/Q1", "Ipê-amarelo", "Folha", "Margem", "Inteira");
        second.wikidata_xref = Some("Q999".to_string());

        let items = normalize(vec![first, second]);
        assert_eq!(items[0].name, "Ipê");
        assert_eq!(items[0].wikidata_xref.as_deref(), Some("Q100"));
    }

    #[test]
    fn xref_absent_on_first_row_stays_absent() {
        let first = row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Oval");
        let mut second = row("https://x/entity/Q1", "Ipê", "Folha", "Margem", "Inteira");
        second.wikidata_xref = Some("Q999".to_string());

        let items = normalize(vec![first, second]);
        assert_eq!(items[0].wikidata_xref, None);
    }

    #[test]
    fn first_non_empty_image_wins() {
        let mut rows = vec![
            row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Oval"),
            row("https://x/entity/Q1", "Ipê", "Folha", "Margem", "Inteira"),
            row("https://x/entity/Q1", "Ipê", "Fruto", "Tipo", "Cápsula"),
        ];
        rows[1].image = Some("a.jpg".to_string());
        rows[2].image = Some("b.jpg".to_string());

        let items = normalize(rows);
        assert_eq!(items[0].image_url.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn empty_image_reference_does_not_count() {
        let mut rows = vec![
            row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Oval"),
            row("https://x/entity/Q1", "Ipê", "Folha", "Margem", "Inteira"),
        ];
        rows[0].image = Some(String::new());
        rows[1].image = Some("x.jpg".to_string());

        let items = normalize(rows);
        assert_eq!(items[0].image_url.as_deref(), Some("x.jpg"));
    }

    #[test]
    fn item_without_image_has_no_image_url() {
        let items = normalize(vec![row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Oval")]);
        assert_eq!(items[0].image_url, None);

        let json = serde_json::to_string(&items).expect("serialização");
        assert!(!json.contains("imageURL"));
        assert!(json.contains(r#""wikidata_xref":null"#));
    }

    #[test]
    fn duplicate_descriptor_keeps_last_value() {
        let rows = vec![
            row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Oval"),
            row("https://x/entity/Q1", "Ipê", "Folha", "Forma", "Lanceolada"),
        ];

        let items = normalize(rows);
        assert_eq!(items[0].traits["Folha"]["Forma"], "Lanceolada");
    }

    #[test]
    fn output_sorted_by_name_case_insensitive() {
        let rows = vec![
            row("https://x/entity/Q1", "zebra", "P", "D", "V"),
            row("https://x/entity/Q2", "Acacia", "P", "D", "V"),
            row("https://x/entity/Q3", "banana", "P", "D", "V"),
        ];

        let items = normalize(rows);
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Acacia", "banana", "zebra"]);
    }

    #[test]
    fn groups_two_rows_into_nested_record() {
        let first = row(
            "https://reflora-traits-test.wikibase.cloud/entity/Q42",
            "Ipê",
            "Leaf",
            "Shape",
            "Oval",
        );
        let mut second = row(
            "https://reflora-traits-test.wikibase.cloud/entity/Q42",
            "Ipê",
            "Leaf",
            "Margin",
            "Entire",
        );
        second.image = Some("Ipe.jpg".to_string());

        let items = normalize(vec![first, second]);
        let expected = serde_json::json!([
            {
                "name": "Ipê",
                "wikibase": "Q42",
                "wikidata_xref": null,
                "traits": {"Leaf": {"Shape": "Oval", "Margin": "Entire"}},
                "imageURL": "Ipe.jpg"
            }
        ]);
        assert_eq!(serde_json::to_value(&items).expect("serialização"), expected);
    }

    #[test]
    fn serialized_output_round_trips() {
        let mut rows = vec![
            row("https://x/entity/Q1", "Cajueiro", "Fruto", "Tipo", "Drupa"),
            row("https://x/entity/Q2", "Aroeira", "Folha", "Forma", "Composta"),
            row("https://x/entity/Q1", "Cajueiro", "Folha", "Margem", "Inteira"),
        ];
        rows[0].image = Some("caju.jpg".to_string());
        rows[1].wikidata_xref = Some("Q2040830".to_string());

        let items = normalize(rows);
        let json = serde_json::to_string_pretty(&items).expect("serialização");
        let reloaded: Vec<ItemRecord> = serde_json::from_str(&json).expect("desserialização");
        assert_eq!(reloaded, items);
    }
}
