// ==========================================
// Gestão de Funcionários - Leitor de arquivo tabular
// ==========================================
// Suporte: Excel (.xlsx/.xls) / CSV (.csv)
// Saída: linha de cabeçalho + linhas de células brutas, posicionais
// Falha estrutural de parse é fatal e distinta de erro de validação
// ==========================================

use crate::domain::funcionario::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// TabelaBruta - matriz de células do arquivo
// ==========================================
#[derive(Debug, Clone)]
pub struct TabelaBruta {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// Trait FileParser
// ==========================================
// Implementadores: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// Interpreta o arquivo em cabeçalho + linhas brutas.
    /// Linhas completamente vazias são descartadas; a numeração de
    /// linha preserva a posição no arquivo original.
    fn parse(&self, file_path: &Path) -> ImportResult<TabelaBruta>;
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> ImportResult<TabelaBruta> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // Linhas com contagem divergente chegam ao pipeline como malformadas
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader);
        }

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();

            // Descarta linhas completamente vazias
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }

            rows.push(RawRow::new(idx + 1, cells));
        }

        Ok(TabelaBruta { headers, rows })
    }
}

// ==========================================
// ExcelParser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, file_path: &Path) -> ImportResult<TabelaBruta> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "planilha sem abas".to_string(),
            ));
        }

        // Primeira aba
        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut raw_rows = range.rows();
        let header_row = raw_rows.next().ok_or(ImportError::MissingHeader)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, data_row) in raw_rows.enumerate() {
            let cells: Vec<String> = data_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();

            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }

            rows.push(RawRow::new(idx + 1, cells));
        }

        Ok(TabelaBruta { headers, rows })
    }
}

// ==========================================
// UniversalFileParser - despacho por extensão
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, file_path: &Path) -> ImportResult<TabelaBruta> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(file_path),
            "xlsx" | "xls" => ExcelParser.parse(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
