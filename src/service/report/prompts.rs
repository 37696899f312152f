//! Prompts for report generation

use crate::model::{RESULT_SPLIT_SEPARATOR, ReportRequest};

/// System prompt for report generation
pub const REPORT_SYSTEM_PROMPT: &str = r#"Tu es TiBreton, un expert en immobilier.

Cet assistant est conçu pour accompagner un professionnel de l’immobilier dans la rédaction de rapports d'expertise complets à partir de divers contenus : commentaires vocaux transcrits, notes écrites (même sous forme de bullet points), ou photos prises lors d’une visite. Il doit extraire et reformuler les informations pertinentes afin de produire automatiquement un rapport structuré conforme aux standards professionnels du secteur immobilier. Le rapport généré doit inclure :

Une présentation du bien
Une description des caractéristiques observées
Les points positifs et les points négatifs
Une recommandation de valeur
Une synthèse d’expertise complète

En plus de cela, l’assistant doit générer une **synthèse de marché localisée**, avec des indicateurs précis tels que :

L’évolution des prix sur 1 an et 5 ans
La tendance actuelle du marché (hausse, baisse)
Le prix moyen au m² et une fourchette de valorisation dans le quartier
Pour cela, l’assistant interrogera automatiquement les sources fiables et à jour. Il croise les données disponibles à l’adresse fournie pour produire une analyse contextuelle pertinente.

Le style rédactionnel doit rester professionnel, clair, structuré, et aligné sur les tournures présentes dans le rapport d'expertise fourni comme exemple. Il est capable de s’adapter à la qualité et la forme des données d’entrée, en posant des questions si nécessaire ou en suggérant des hypothèses réalistes. Une fois l’analyse terminée, l’assistant livre un document structuré pouvant être intégré directement dans le logiciel métier de l’utilisateur."#;

const NOT_SPECIFIED: &str = "Non précisée";
const NO_CONTEXT: &str = "Aucun";

/// Build the user prompt from a validated request
pub fn build_report_prompt(request: &ReportRequest) -> String {
    let surface = request
        .surface
        .map(|s| s.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let year_built = request
        .year_built
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let extra_context = request
        .extra_context
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_CONTEXT);

    format!(
        r#"Voici les informations brutes sur le bien et la visite. Génère le rapport d’expertise complet et la synthèse de marché conformément au prompt système.

Adresse du bien : {address}
Type de bien : {property_type}
Surface approximative : {surface} m²
Année de construction approximative : {year_built}
Notes de visite : {notes}
Contexte supplémentaire : {extra_context}
Niveau de détail souhaité : {detail}

Structure la réponse en deux parties, séparées par le séparateur clair "{RESULT_SPLIT_SEPARATOR}" :
1) Rapport d’expertise complet
2) Synthèse de marché localisée"#,
        address = request.address,
        property_type = request.property_type,
        notes = request.notes,
        detail = request.detail_level.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetailLevel;

    fn request() -> ReportRequest {
        ReportRequest {
            address: "12 rue de Bretagne, 35000 Rennes".to_string(),
            property_type: "Maison".to_string(),
            surface: Some(120.0),
            year_built: Some(1998),
            notes: "Bon état général".to_string(),
            extra_context: Some("Succession".to_string()),
            detail_level: DetailLevel::Detailed,
        }
    }

    #[test]
    fn test_prompt_embeds_all_fields() {
        let prompt = build_report_prompt(&request());
        assert!(prompt.contains("Adresse du bien : 12 rue de Bretagne, 35000 Rennes"));
        assert!(prompt.contains("Type de bien : Maison"));
        assert!(prompt.contains("Surface approximative : 120 m²"));
        assert!(prompt.contains("Année de construction approximative : 1998"));
        assert!(prompt.contains("Notes de visite : Bon état général"));
        assert!(prompt.contains("Contexte supplémentaire : Succession"));
        assert!(prompt.contains("Niveau de détail souhaité : Très détaillé"));
        assert!(prompt.contains("\"--- Synthèse de marché ---\""));
    }

    #[test]
    fn test_prompt_placeholders_for_missing_fields() {
        let mut req = request();
        req.surface = None;
        req.year_built = None;
        req.extra_context = Some(String::new());
        req.detail_level = DetailLevel::Standard;

        let prompt = build_report_prompt(&req);
        assert!(prompt.contains("Surface approximative : Non précisée m²"));
        assert!(prompt.contains("Année de construction approximative : Non précisée"));
        assert!(prompt.contains("Contexte supplémentaire : Aucun"));
        assert!(prompt.contains("Niveau de détail souhaité : Standard"));
    }

    #[test]
    fn test_fractional_surface() {
        let mut req = request();
        req.surface = Some(85.5);
        assert!(build_report_prompt(&req).contains("Surface approximative : 85.5 m²"));
    }

    #[test]
    fn test_system_prompt_lists_report_sections() {
        for section in [
            "Une présentation du bien",
            "Les points positifs et les points négatifs",
            "Une recommandation de valeur",
            "L’évolution des prix sur 1 an et 5 ans",
            "Le prix moyen au m²",
        ] {
            assert!(REPORT_SYSTEM_PROMPT.contains(section), "missing {section}");
        }
    }
}
