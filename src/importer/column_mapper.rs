// ==========================================
// Gestão de Funcionários - Mapeador de colunas
// ==========================================
// Vincula cada coluna do arquivo a um campo do esquema do sistema
// ou ao sentinela "ignorar"
// Função pura de (cabeçalho, vínculos) → ColumnMapping | erro estrutural
// Invariante: todo campo obrigatório vinculado exatamente uma vez
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// CampoAlvo - campo do esquema do sistema
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampoAlvo {
    NomeCompleto,
    Cpf,
    DataNascimento,
    Cargo,
    Salario,
    EstadoCivil,
    Email,
    Telefone,
    /// Sentinela: coluna presente no arquivo mas descartada
    Ignorar,
}

impl CampoAlvo {
    pub const OBRIGATORIOS: [CampoAlvo; 5] = [
        CampoAlvo::NomeCompleto,
        CampoAlvo::Cpf,
        CampoAlvo::DataNascimento,
        CampoAlvo::Cargo,
        CampoAlvo::Salario,
    ];

    pub fn is_obrigatorio(&self) -> bool {
        Self::OBRIGATORIOS.contains(self)
    }
}

impl fmt::Display for CampoAlvo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nome = match self {
            CampoAlvo::NomeCompleto => "nome_completo",
            CampoAlvo::Cpf => "cpf",
            CampoAlvo::DataNascimento => "data_nascimento",
            CampoAlvo::Cargo => "cargo",
            CampoAlvo::Salario => "salario_mensal",
            CampoAlvo::EstadoCivil => "estado_civil",
            CampoAlvo::Email => "email",
            CampoAlvo::Telefone => "telefone",
            CampoAlvo::Ignorar => "ignorar",
        };
        write!(f, "{}", nome)
    }
}

// ==========================================
// ColumnMapping - mapeamento resolvido
// ==========================================
// Construído uma vez por execução, imutável depois
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    indices: HashMap<CampoAlvo, usize>,
    total_colunas: usize,
}

impl ColumnMapping {
    /// Índice da coluna vinculada ao campo, se houver
    pub fn indice(&self, campo: CampoAlvo) -> Option<usize> {
        self.indices.get(&campo).copied()
    }

    /// Valor da célula do campo em uma linha; None quando o campo
    /// não está vinculado ou a célula não existe
    pub fn valor<'a>(&self, cells: &'a [String], campo: CampoAlvo) -> Option<&'a str> {
        self.indice(campo).and_then(|i| cells.get(i)).map(|s| s.as_str())
    }

    /// Contagem de colunas do cabeçalho (para detectar linha malformada)
    pub fn total_colunas(&self) -> usize {
        self.total_colunas
    }
}

// ==========================================
// ColumnMapper - resolução dos vínculos
// ==========================================
pub struct ColumnMapper;

impl ColumnMapper {
    /// Resolve os vínculos informados pelo usuário contra o cabeçalho.
    ///
    /// # Parâmetros
    /// - headers: linha de cabeçalho do arquivo
    /// - vinculos: pares (rótulo da coluna de origem, campo alvo)
    ///
    /// # Erros
    /// - MappingIncomplete: campo obrigatório sem coluna vinculada
    /// - MappingConflict: campo obrigatório com mais de uma coluna,
    ///   ou mesma coluna vinculada a dois alvos distintos
    pub fn resolver(
        headers: &[String],
        vinculos: &[(String, CampoAlvo)],
    ) -> ImportResult<ColumnMapping> {
        // Vínculo por rótulo: mesma coluna para dois alvos é conflito
        let mut por_rotulo: HashMap<&str, CampoAlvo> = HashMap::new();
        for (rotulo, campo) in vinculos {
            if let Some(existente) = por_rotulo.insert(rotulo.as_str(), *campo) {
                if existente != *campo {
                    return Err(ImportError::MappingConflict {
                        message: format!(
                            "coluna '{}' vinculada a dois alvos: {} e {}",
                            rotulo, existente, campo
                        ),
                    });
                }
            }
        }

        // Posição de cada vínculo no cabeçalho; campo alvo repetido
        // em duas colunas é conflito
        let mut indices: HashMap<CampoAlvo, usize> = HashMap::new();
        for (pos, header) in headers.iter().enumerate() {
            let campo = match por_rotulo.get(header.trim()) {
                Some(c) => *c,
                None => continue, // Coluna sem vínculo: ignorada
            };
            if campo == CampoAlvo::Ignorar {
                continue;
            }
            if let Some(anterior) = indices.insert(campo, pos) {
                return Err(ImportError::MappingConflict {
                    message: format!(
                        "campo {} vinculado a duas colunas (posições {} e {})",
                        campo, anterior, pos
                    ),
                });
            }
        }

        // Todo obrigatório precisa de exatamente uma coluna
        let faltantes: Vec<String> = CampoAlvo::OBRIGATORIOS
            .iter()
            .filter(|c| !indices.contains_key(c))
            .map(|c| c.to_string())
            .collect();
        if !faltantes.is_empty() {
            return Err(ImportError::MappingIncomplete { campos: faltantes });
        }

        Ok(ColumnMapping {
            indices,
            total_colunas: headers.len(),
        })
    }
}
