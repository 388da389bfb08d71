// ==========================================
// Gestão de Funcionários - Validador de CPF
// ==========================================
// Algoritmo: dois dígitos verificadores por soma ponderada módulo 11
// 1º dígito: pesos 10..2 sobre d1..d9; resto >= 2 → esperado = 11 - resto, senão 0
// 2º dígito: pesos 11..2 sobre d1..d10; mesma regra de resto
// Classe conhecida-inválida: 11 dígitos idênticos é sempre rejeitado,
// mesmo quando a aritmética dos verificadores fecharia
// ==========================================

/// Resultado da validação de um CPF já normalizado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpfValidacao {
    Valido,
    TamanhoInvalido(usize),
    DigitosRepetidos,
    ChecksumInvalido,
}

/// Remove tudo que não é dígito ("529.982.247-25" → "52998224725")
pub fn normalizar(valor: &str) -> String {
    valor.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Valida um CPF normalizado (apenas dígitos)
pub fn validar(cpf: &str) -> CpfValidacao {
    if cpf.len() != 11 || !cpf.chars().all(|c| c.is_ascii_digit()) {
        return CpfValidacao::TamanhoInvalido(cpf.len());
    }

    let digitos: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    // Classe conhecida-inválida: 111.111.111-11 etc.
    if digitos.iter().all(|&d| d == digitos[0]) {
        return CpfValidacao::DigitosRepetidos;
    }

    if digitos[9] != digito_verificador(&digitos[..9], 10)
        || digitos[10] != digito_verificador(&digitos[..10], 11)
    {
        return CpfValidacao::ChecksumInvalido;
    }

    CpfValidacao::Valido
}

/// Dígito verificador: soma de d_i * (peso_inicial - i) mod 11.
/// `peso_inicial` é 10 para o primeiro dígito (9 posições) e 11
/// para o segundo (10 posições); o peso decresce até 2.
fn digito_verificador(digitos: &[u32], peso_inicial: u32) -> u32 {
    let soma: u32 = digitos
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (peso_inicial - i as u32))
        .sum();

    let resto = soma % 11;
    if resto >= 2 {
        11 - resto
    } else {
        0
    }
}
