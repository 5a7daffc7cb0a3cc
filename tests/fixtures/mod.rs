//! Test fixtures for deterministic archive layouts

use idfa::SENTINEL_STEM;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a file, creating parent directories as needed
pub fn write_file(path: impl AsRef<Path>, contents: &[u8]) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// File name of a sentinel marker with a PDF extension
pub fn sentinel_file_name() -> String {
    format!("{SENTINEL_STEM}.pdf")
}

/// Create the October archive used across tests.
///
/// Layout under `<base>/10. Outubro`:
/// - `1. SMS`: a mix of populated, empty, sentinel-only and missing leaves
/// - `2. Qualidade`: one populated and one empty leaf, the rest missing
/// - `3. Prazo` and `4. Gestão`: absent
pub fn create_reference_archive(base: &Path) -> std::io::Result<PathBuf> {
    let root = base.join("10. Outubro");
    let sms = root.join("1. SMS");

    let incidentes = sms.join("1. Incidentes");
    for name in ["f1.pdf", "f2.pdf", "f3.pdf"] {
        write_file(
            incidentes.join("1.1 Abrangencia das Ocorrencias").join(name),
            b"evidence",
        )?;
    }
    // nested files are not direct children of the leaf
    write_file(
        incidentes.join("1.1 Abrangencia das Ocorrencias/anexos/extra.pdf"),
        b"nested",
    )?;
    write_file(
        incidentes
            .join("1.2 Tratamento das Ocorrencias")
            .join(sentinel_file_name()),
        b"",
    )?;
    let ocorrencias = incidentes.join("1.3 Ocorrencias");
    write_file(ocorrencias.join(sentinel_file_name()), b"")?;
    write_file(ocorrencias.join("RO-002.pdf"), b"ro")?;
    write_file(ocorrencias.join("RO-001.pdf"), b"ro")?;

    fs::create_dir_all(
        sms.join("2. Normas Regulamentadoras/2.1 Matriz de Treinamento e NR 01"),
    )?;

    let gestao = sms.join("3. Gestão de SMS");
    write_file(
        gestao.join("3.2 Avaliações Iniciais (PGR e PCMSO)/PCMSO.pdf"),
        b"pcmso",
    )?;
    let proativas = gestao.join("3.3 Ferramentas Proativas");
    write_file(proativas.join("DDS/dds-01.pdf"), b"dds")?;
    fs::create_dir_all(proativas.join("Inspeções de Segurança"))?;
    fs::create_dir_all(proativas.join("Observações Comportamentais"))?;

    let qualidade = root.join("2. Qualidade/2.1 Controle de Documentos");
    write_file(qualidade.join("1. Lista Mestra/lista.xlsx"), b"lista")?;
    fs::create_dir_all(qualidade.join("2. Controle de Registros"))?;

    Ok(root)
}
