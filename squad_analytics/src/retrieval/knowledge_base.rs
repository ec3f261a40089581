//! Fixed knowledge bases for the finance, marketing and HR topics.

use super::KnowledgeItem;

struct Entry {
    key: &'static str,
    content: &'static str,
    keywords: &'static [&'static str],
    tags: &'static [&'static str],
    source: &'static str,
}

impl Entry {
    fn to_item(&self) -> KnowledgeItem {
        KnowledgeItem {
            key: self.key.to_string(),
            content: self.content.to_string(),
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            source: self.source.to_string(),
        }
    }
}

const FINANCE: &[Entry] = &[
    Entry {
        key: "fluxo_caixa",
        content: "Fluxo de caixa é o controle de entradas e saídas de dinheiro da empresa. É fundamental para manter a saúde financeira e evitar problemas de liquidez.",
        keywords: &["fluxo", "caixa", "entradas", "saídas", "liquidez", "dinheiro"],
        tags: &["financeiro", "caixa", "controle"],
        source: "conhecimento_financeiro",
    },
    Entry {
        key: "dre",
        content: "DRE (Demonstração do Resultado do Exercício) mostra a receita, custos e despesas da empresa, resultando no lucro ou prejuízo do período.",
        keywords: &["dre", "receita", "custos", "despesas", "lucro", "prejuízo"],
        tags: &["financeiro", "dre", "demonstração"],
        source: "conhecimento_financeiro",
    },
    Entry {
        key: "simples_nacional",
        content: "Simples Nacional é um regime tributário simplificado para micro e pequenas empresas, com alíquotas reduzidas e pagamento unificado de impostos.",
        keywords: &["simples", "nacional", "tributário", "impostos", "alíquotas"],
        tags: &["tributário", "simples", "impostos"],
        source: "conhecimento_tributário",
    },
    Entry {
        key: "pix",
        content: "PIX é o sistema de pagamentos instantâneos do Brasil, que permite transferências 24/7 de forma gratuita e instantânea.",
        keywords: &["pix", "pagamento", "instantâneo", "transferência"],
        tags: &["pagamentos", "pix", "instantâneo"],
        source: "conhecimento_pagamentos",
    },
    Entry {
        key: "lgpd",
        content: "LGPD (Lei Geral de Proteção de Dados) estabelece regras para coleta, armazenamento e uso de dados pessoais, com multas de até 2% do faturamento.",
        keywords: &["lgpd", "dados", "pessoais", "proteção", "privacidade"],
        tags: &["compliance", "lgpd", "dados"],
        source: "conhecimento_compliance",
    },
];

const MARKETING: &[Entry] = &[
    Entry {
        key: "funil_vendas",
        content: "Funil de vendas é o processo que leva um lead desde o primeiro contato até a conversão em cliente, passando por etapas de conscientização, interesse, consideração e decisão.",
        keywords: &["funil", "vendas", "lead", "conversão", "cliente", "processo"],
        tags: &["vendas", "funil", "conversão"],
        source: "conhecimento_vendas",
    },
    Entry {
        key: "marketing_digital",
        content: "Marketing digital utiliza canais online para promover produtos e serviços, incluindo SEO, SEM, redes sociais, email marketing e conteúdo.",
        keywords: &["marketing", "digital", "online", "seo", "sem", "redes", "sociais"],
        tags: &["marketing", "digital", "online"],
        source: "conhecimento_marketing",
    },
    Entry {
        key: "whatsapp_business",
        content: "WhatsApp Business é uma ferramenta poderosa para atendimento ao cliente, vendas e marketing, com recursos como catálogo, mensagens automáticas e etiquetas.",
        keywords: &["whatsapp", "business", "atendimento", "vendas", "catálogo"],
        tags: &["whatsapp", "business", "atendimento"],
        source: "conhecimento_whatsapp",
    },
    Entry {
        key: "conteudo_marketing",
        content: "Marketing de conteúdo cria e distribui conteúdo valioso para atrair e engajar audiência, incluindo blog posts, vídeos, infográficos e e-books.",
        keywords: &["conteúdo", "marketing", "blog", "vídeo", "infográfico", "e-book"],
        tags: &["conteúdo", "marketing", "engajamento"],
        source: "conhecimento_conteudo",
    },
    Entry {
        key: "analytics",
        content: "Analytics mede e analisa o desempenho de campanhas de marketing, incluindo métricas como CTR, conversão, ROI e engajamento.",
        keywords: &["analytics", "métricas", "ctr", "conversão", "roi", "engajamento"],
        tags: &["analytics", "métricas", "performance"],
        source: "conhecimento_analytics",
    },
];

const HUMAN_RESOURCES: &[Entry] = &[
    Entry {
        key: "gestao_pessoas",
        content: "Gestão de pessoas envolve recrutamento, seleção, treinamento, desenvolvimento e retenção de talentos, sendo fundamental para o sucesso da empresa.",
        keywords: &["gestão", "pessoas", "recrutamento", "seleção", "treinamento", "talentos"],
        tags: &["rh", "gestão", "pessoas"],
        source: "conhecimento_rh",
    },
    Entry {
        key: "clt",
        content: "CLT (Consolidação das Leis do Trabalho) estabelece as normas de trabalho no Brasil, incluindo direitos, deveres e obrigações de empregadores e empregados.",
        keywords: &["clt", "trabalho", "direitos", "deveres", "empregador", "empregado"],
        tags: &["trabalhista", "clt", "direitos"],
        source: "conhecimento_trabalhista",
    },
    Entry {
        key: "home_office",
        content: "Trabalho remoto ou home office requer políticas claras, ferramentas adequadas e gestão de equipe adaptada para manter produtividade e engajamento.",
        keywords: &["home", "office", "remoto", "trabalho", "produtividade", "engajamento"],
        tags: &["trabalho", "remoto", "home_office"],
        source: "conhecimento_remoto",
    },
    Entry {
        key: "avaliacao_desempenho",
        content: "Avaliação de desempenho mede o rendimento dos colaboradores, identificando pontos fortes e áreas de melhoria para desenvolvimento profissional.",
        keywords: &["avaliação", "desempenho", "rendimento", "colaboradores", "desenvolvimento"],
        tags: &["avaliação", "desempenho", "desenvolvimento"],
        source: "conhecimento_avaliacao",
    },
    Entry {
        key: "cultura_organizacional",
        content: "Cultura organizacional são os valores, crenças e comportamentos que definem como a empresa funciona e como as pessoas se relacionam.",
        keywords: &["cultura", "organizacional", "valores", "crenças", "comportamentos"],
        tags: &["cultura", "organizacional", "valores"],
        source: "conhecimento_cultura",
    },
];

pub fn finance() -> Vec<KnowledgeItem> {
    FINANCE.iter().map(Entry::to_item).collect()
}

pub fn marketing() -> Vec<KnowledgeItem> {
    MARKETING.iter().map(Entry::to_item).collect()
}

pub fn human_resources() -> Vec<KnowledgeItem> {
    HUMAN_RESOURCES.iter().map(Entry::to_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_topic_has_five_items() {
        assert_eq!(finance().len(), 5);
        assert_eq!(marketing().len(), 5);
        assert_eq!(human_resources().len(), 5);
    }

    #[test]
    fn test_keys_are_unique_per_topic() {
        for items in [finance(), marketing(), human_resources()] {
            let mut keys: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), items.len());
        }
    }
}
