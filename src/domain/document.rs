// ==========================================
// Prospect Intake - Customer Wire Document
// ==========================================
// Nested document consumed by the downstream ingestion system.
// Field names are that system's contract and must not change.
// ==========================================

use serde::{Deserialize, Serialize};

/// Person-type tag; prospects are always individuals
pub const PERSON_TYPE_INDIVIDUAL: &str = "FISICA";

/// Phone type tag written on every phone entry
pub const PHONE_TYPE_MOBILE: &str = "CELULAR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDocument {
    pub id: String, // "<institution>-<taxId>"
    pub agrupador: String,
    pub tipo_pessoa: String,
    pub nome: String,
    pub cpf: String,
    pub data_nascimento: String,
    pub tipo: String,
    pub enderecos: Vec<AddressEntry>,
    pub emails: Vec<EmailEntry>,
    pub telefones: Vec<PhoneEntry>,
    pub informacoes_adicionais: Vec<AdditionalInfoEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub numero: String,
    pub uf: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEntry {
    pub tipo: String,
    pub ddd: String,      // area code: first two digits
    pub telefone: String, // local number: the rest
}

/// Echoed source value with its 1-based sheet coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfoEntry {
    pub campo: String,
    pub linha: usize,
    pub coluna: usize,
    pub valor: String,
}

impl CustomerDocument {
    /// Split the composite id back into (institution, tax ID).
    ///
    /// Tax IDs never contain '-', so the last separator is the split point.
    pub fn split_id(&self) -> Option<(&str, &str)> {
        self.id.rsplit_once('-')
    }
}
