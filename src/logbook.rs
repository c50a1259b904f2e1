//! Append-only interaction log.
//!
//! One flat record per completed reading, human-readable `Clave: valor`
//! lines closed by a delimiter. Write-only audit trail; nothing in the bot
//! ever reads it back.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use crate::chart::ChartRequest;

const DELIMITER: &str = "-------------------------------";

pub struct Logbook {
    path: PathBuf,
}

impl Logbook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one record. The whole entry goes out in a single write so
    /// concurrent sessions cannot interleave records.
    pub async fn append(&self, request: &ChartRequest) -> std::io::Result<()> {
        let entry = render_entry(request);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await
    }
}

fn render_entry(request: &ChartRequest) -> String {
    format!(
        "Nombre: {}\nFecha: {}-{}-{}\nHora: {}:{}\nUbicación: {}\n{DELIMITER}\n",
        request.name,
        request.day,
        request.month,
        request.year,
        request.hour,
        request.minute,
        request.location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> ChartRequest {
        ChartRequest {
            name: name.into(),
            year: 1990,
            month: 7,
            day: 15,
            hour: 14,
            minute: 30,
            location: "madrid".into(),
            country_code: "ES".into(),
        }
    }

    #[test]
    fn entry_has_all_fields_and_delimiter() {
        let entry = render_entry(&request("Ana"));
        assert!(entry.contains("Nombre: Ana"));
        assert!(entry.contains("Fecha: 15-7-1990"));
        assert!(entry.contains("Hora: 14:30"));
        assert!(entry.contains("Ubicación: madrid"));
        assert!(entry.ends_with(&format!("{DELIMITER}\n")));
    }

    #[tokio::test]
    async fn append_accumulates_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuarios.txt");
        let logbook = Logbook::new(&path);

        logbook.append(&request("Ana")).await.unwrap();
        logbook.append(&request("Luz")).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.matches(DELIMITER).count(), 2);
        assert!(contents.contains("Nombre: Ana"));
        assert!(contents.contains("Nombre: Luz"));
        let ana = contents.find("Nombre: Ana").unwrap();
        let luz = contents.find("Nombre: Luz").unwrap();
        assert!(ana < luz, "records must append in order");
    }
}
