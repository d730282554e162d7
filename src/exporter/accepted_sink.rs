// ==========================================
// Prospect Intake - Accepted Records Sink (JSON)
// ==========================================
// One JSON array, UTF-8, 4-space indentation, non-ASCII kept literal
// ==========================================

use crate::domain::CustomerDocument;
use crate::importer::error::{ImportError, ImportResult};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Default)]
pub struct AcceptedJsonSink;

impl AcceptedJsonSink {
    pub fn write_to<W: Write>(&self, writer: W, documents: &[CustomerDocument]) -> ImportResult<()> {
        let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
        documents.serialize(&mut ser)?;
        let mut writer = ser.into_inner();
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| ImportError::FileWriteError(e.to_string()))?;
        Ok(())
    }

    pub fn render(&self, documents: &[CustomerDocument]) -> ImportResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, documents)?;
        String::from_utf8(buf).map_err(|e| ImportError::JsonError(e.to_string()))
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub fn write(&self, path: &Path, documents: &[CustomerDocument]) -> ImportResult<()> {
        let file = File::create(path)
            .map_err(|e| ImportError::FileWriteError(format!("{}: {}", path.display(), e)))?;
        self.write_to(BufWriter::new(file), documents)?;
        info!(path = %path.display(), "accepted records written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressEntry, EmailEntry, PhoneEntry};

    fn document() -> CustomerDocument {
        CustomerDocument {
            id: "unifoo-11144477735".to_string(),
            agrupador: "unifoo".to_string(),
            tipo_pessoa: "FISICA".to_string(),
            nome: "JOSÉ ARAÚJO".to_string(),
            cpf: "11144477735".to_string(),
            data_nascimento: "1990-05-17".to_string(),
            tipo: "I".to_string(),
            enderecos: vec![AddressEntry {
                cep: "01310100".to_string(),
                logradouro: "AVENIDA PAULISTA".to_string(),
                bairro: "BELA VISTA".to_string(),
                cidade: "SÃO PAULO".to_string(),
                numero: "1000".to_string(),
                uf: "SP".to_string(),
            }],
            emails: vec![EmailEntry {
                email: "jose@example.com".to_string(),
            }],
            telefones: vec![PhoneEntry {
                tipo: "CELULAR".to_string(),
                ddd: "11".to_string(),
                telefone: "999999999".to_string(),
            }],
            informacoes_adicionais: vec![],
        }
    }

    #[test]
    fn test_empty_array() {
        let out = AcceptedJsonSink.render(&[]).unwrap();
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        let out = AcceptedJsonSink.render(&[document()]).unwrap();
        assert!(out.contains("JOSÉ ARAÚJO"));
        assert!(out.contains("SÃO PAULO"));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn test_four_space_indentation() {
        let out = AcceptedJsonSink.render(&[document()]).unwrap();
        assert!(out.starts_with("[\n    {\n        \"id\": \"unifoo-11144477735\""));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientes_para_subir.json");

        AcceptedJsonSink.write(&path, &[document()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<CustomerDocument> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![document()]);
    }
}
