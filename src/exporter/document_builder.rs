// ==========================================
// Prospect Intake - Wire Document Projection
// ==========================================
// ClassifiedRecord → CustomerDocument
// Phone is split here (area code / local number), never in validation.
// ==========================================

use crate::domain::{
    AdditionalInfoEntry, AddressEntry, ClassifiedRecord, CustomerDocument, EmailEntry, PhoneEntry,
    PERSON_TYPE_INDIVIDUAL, PHONE_TYPE_MOBILE,
};
use crate::importer::field_mapper::columns;

/// Number of leading phone digits forming the area code
pub const AREA_CODE_LEN: usize = 2;

pub const FIELD_TAX_ID: &str = "cpf_aluno";
pub const FIELD_REGISTRATION: &str = "registro_aluno";
pub const FIELD_NAME: &str = "nome_aluno";

/// `<institution>-<taxId>`
pub fn composite_id(institution: &str, tax_id: &str) -> String {
    format!("{}-{}", institution, tax_id)
}

/// (area code, local number); shorter inputs yield a short area code
pub fn split_phone(phone: &str) -> (String, String) {
    let cut = phone
        .char_indices()
        .nth(AREA_CODE_LEN)
        .map(|(idx, _)| idx)
        .unwrap_or(phone.len());
    let (ddd, local) = phone.split_at(cut);
    (ddd.to_string(), local.to_string())
}

pub fn to_customer_document(classified: &ClassifiedRecord) -> CustomerDocument {
    let record = &classified.row.record;
    let sheet_row = classified.row.row_index + columns::SHEET_ROW_OFFSET;
    let (ddd, telefone) = split_phone(&record.phone);

    let info = |campo: &str, coluna: usize, valor: &str| AdditionalInfoEntry {
        campo: campo.to_string(),
        linha: sheet_row,
        coluna,
        valor: valor.to_string(),
    };

    CustomerDocument {
        id: composite_id(&record.institution, &record.tax_id),
        agrupador: record.institution.clone(),
        tipo_pessoa: PERSON_TYPE_INDIVIDUAL.to_string(),
        nome: record.name.clone(),
        cpf: record.tax_id.clone(),
        data_nascimento: record.birth_date.to_canonical_string(),
        tipo: classified.tag.wire_code().to_string(),
        enderecos: vec![AddressEntry {
            cep: record.postal_code.clone(),
            logradouro: record.street.clone(),
            bairro: record.district.clone(),
            cidade: record.city.clone(),
            numero: record.street_number.clone(),
            uf: record.region.clone(),
        }],
        emails: vec![EmailEntry {
            email: record.email.clone(),
        }],
        telefones: vec![PhoneEntry {
            tipo: PHONE_TYPE_MOBILE.to_string(),
            ddd,
            telefone,
        }],
        informacoes_adicionais: vec![
            info(FIELD_TAX_ID, columns::TAX_ID_SHEET_COLUMN, &record.tax_id),
            info(
                FIELD_REGISTRATION,
                columns::REGISTRATION_SHEET_COLUMN,
                &record.registration_code,
            ),
            info(FIELD_NAME, columns::NAME_SHEET_COLUMN, &record.name),
        ],
    }
}

/// Project every classified record, input order preserved
pub fn build_documents(classified: &[ClassifiedRecord]) -> Vec<CustomerDocument> {
    classified.iter().map(to_customer_document).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BirthDate, ClassificationTag, ProspectRecord, ProspectRow};
    use chrono::NaiveDate;

    fn classified(row_index: usize, tag: ClassificationTag) -> ClassifiedRecord {
        ClassifiedRecord {
            row: ProspectRow {
                row_index,
                record: ProspectRecord {
                    name: "JOÃO PEREIRA".to_string(),
                    tax_id: "52998224725".to_string(),
                    birth_date: BirthDate::Parsed(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()),
                    email: "joao@example.com".to_string(),
                    phone: "21987654321".to_string(),
                    postal_code: "20040002".to_string(),
                    street: "RUA DA ASSEMBLEIA".to_string(),
                    street_number: "10".to_string(),
                    district: "CENTRO".to_string(),
                    city: "RIO DE JANEIRO".to_string(),
                    region: "RJ".to_string(),
                    institution: "uni-rio".to_string(),
                    course: "MEDICINA".to_string(),
                    registration_code: "2024001".to_string(),
                },
            },
            tag,
        }
    }

    #[test]
    fn test_split_phone() {
        assert_eq!(split_phone("21987654321"), ("21".to_string(), "987654321".to_string()));
        assert_eq!(split_phone("2133334444"), ("21".to_string(), "33334444".to_string()));
        assert_eq!(split_phone("2"), ("2".to_string(), String::new()));
        assert_eq!(split_phone(""), (String::new(), String::new()));
    }

    #[test]
    fn test_document_fields() {
        let doc = to_customer_document(&classified(5, ClassificationTag::Insert));

        assert_eq!(doc.id, "uni-rio-52998224725");
        assert_eq!(doc.agrupador, "uni-rio");
        assert_eq!(doc.tipo_pessoa, "FISICA");
        assert_eq!(doc.data_nascimento, "1999-12-31");
        assert_eq!(doc.tipo, "I");
        assert_eq!(doc.enderecos[0].numero, "10");
        assert_eq!(doc.enderecos[0].uf, "RJ");
        assert_eq!(doc.telefones[0].tipo, "CELULAR");
        assert_eq!(doc.telefones[0].ddd, "21");
        assert_eq!(doc.telefones[0].telefone, "987654321");
    }

    #[test]
    fn test_additional_info_coordinates() {
        let doc = to_customer_document(&classified(5, ClassificationTag::Update));

        let coords: Vec<(&str, usize, usize, &str)> = doc
            .informacoes_adicionais
            .iter()
            .map(|i| (i.campo.as_str(), i.linha, i.coluna, i.valor.as_str()))
            .collect();
        assert_eq!(
            coords,
            vec![
                ("cpf_aluno", 7, 2, "52998224725"),
                ("registro_aluno", 7, 12, "2024001"),
                ("nome_aluno", 7, 1, "JOÃO PEREIRA"),
            ]
        );
        assert_eq!(doc.tipo, "A");
    }

    #[test]
    fn test_composite_id_splits_back_even_with_hyphenated_institution() {
        let doc = to_customer_document(&classified(0, ClassificationTag::Insert));
        assert_eq!(doc.split_id(), Some(("uni-rio", "52998224725")));
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let doc = to_customer_document(&classified(0, ClassificationTag::Insert));
        let json = serde_json::to_value(&doc).unwrap();

        for key in ["tipoPessoa", "dataNascimento", "informacoesAdicionais", "telefones"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("tipo_pessoa").is_none());
    }
}
