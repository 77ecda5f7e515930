/// 答题应用内置的兴趣类别目录
///
/// 覆盖率统计以此为"已知标签"的基础，题库中出现的其他标签同样计入
pub const INTEREST_CATALOGUE: &[&str] = &[
    "Tecnologia",
    "Fotografia",
    "Leitura",
    "Cinema",
    "Música",
    "Viagens",
    "Gastronomia",
    "Esportes",
    "Carros",
    "Moda",
    "Games",
    "Desenvolvimento Pessoal",
    "Investimentos",
    "Meditação",
    "Empreendedorismo",
    "Natureza",
    "Animais",
    "Culinária",
    "Artesanato",
    "Dança",
    "Ciência",
    "História",
    "Psicologia",
    "Moda e Estilo",
    "Humor",
    "Política",
    "Religião",
    "Séries de TV",
    "Podcasts",
    "Cultura Pop",
    "Design",
    "Arquitetura",
    "DIY (Faça Você Mesmo)",
    "Jardinagem",
    "Educação",
    "Programação",
    "Inteligência Artificial",
    "Saúde e Bem-Estar",
    "Fotografia com Drone",
];

/// 目录中的兴趣名称（拥有所有权的副本）
pub fn catalogue_tags() -> Vec<String> {
    INTEREST_CATALOGUE.iter().map(|s| s.to_string()).collect()
}
