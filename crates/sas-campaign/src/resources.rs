//! Localized copy templates, keyed by (locale tag, field).
//!
//! Each field resolves independently through the chain
//! country locale (`pt-BR`) → language family (`pt`) → default (`en`), so a
//! locale may localize its headlines while borrowing another locale's
//! extensions.

use serde::Serialize;

use sas_core::CountryLocaleRecord;

pub const DEFAULT_LOCALE_TAG: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyField {
    Headlines,
    Descriptions,
    Sitelinks,
    Callouts,
    Snippets,
}

/// Which link of the fallback chain produced a template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackLevel {
    Country,
    LanguageFamily,
    Default,
}

/// One template. `category` is only meaningful for extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub category: &'static str,
    pub text: &'static str,
}

const fn t(text: &'static str) -> Template {
    Template { category: "", text }
}

const fn c(category: &'static str, text: &'static str) -> Template {
    Template { category, text }
}

struct LocaleResource {
    tag: &'static str,
    field: CopyField,
    templates: &'static [Template],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTemplates {
    pub tag: &'static str,
    pub level: FallbackLevel,
    pub templates: &'static [Template],
}

/// Resolve the templates for `field` in the locale of `record`.
#[must_use]
pub fn resolve_templates(record: &CountryLocaleRecord, field: CopyField) -> ResolvedTemplates {
    let chain = [
        (record.language, FallbackLevel::Country),
        (record.language_family(), FallbackLevel::LanguageFamily),
    ];
    chain
        .into_iter()
        .find_map(|(tag, level)| {
            find(tag, field).map(|templates| ResolvedTemplates {
                tag,
                level,
                templates,
            })
        })
        .unwrap_or_else(|| ResolvedTemplates {
            tag: DEFAULT_LOCALE_TAG,
            level: FallbackLevel::Default,
            templates: find(DEFAULT_LOCALE_TAG, field).unwrap_or(&[]),
        })
}

fn find(tag: &str, field: CopyField) -> Option<&'static [Template]> {
    RESOURCES
        .iter()
        .find(|r| r.field == field && r.tag.eq_ignore_ascii_case(tag))
        .map(|r| r.templates)
}

/// Values substituted into `{product}`, `{price}` and `{guarantee}`.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    pub product: Option<String>,
    pub price: Option<String>,
    pub guarantee: Option<String>,
}

impl Placeholders {
    /// Fill a template, or `None` when it needs a value that is missing.
    ///
    /// Substitution is a single left-to-right pass; inserted values are never
    /// rescanned. Braces that are not a known placeholder are kept verbatim.
    #[must_use]
    pub fn render(&self, template: &str) -> Option<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            match self.lookup(tail) {
                Some((token, value)) => {
                    out.push_str(value?);
                    rest = &tail[token.len()..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        Some(out)
    }

    /// The placeholder `text` starts with, paired with its value.
    fn lookup(&self, text: &str) -> Option<(&'static str, Option<&str>)> {
        [
            ("{product}", &self.product),
            ("{price}", &self.price),
            ("{guarantee}", &self.guarantee),
        ]
        .into_iter()
        .find(|(token, _)| text.starts_with(*token))
        .map(|(token, value)| (token, value.as_deref()))
    }
}

static RESOURCES: &[LocaleResource] = &[
    // ---------------------------------------------------------------- en
    LocaleResource {
        tag: "en",
        field: CopyField::Headlines,
        templates: &[
            t("{product} Official Site"),
            t("Buy {product} Now"),
            t("Get {product} Today"),
            t("{product} Only {price}"),
            t("{guarantee}-Day Money Back"),
            t("Order {product} Online"),
            t("Limited Offer On {product}"),
            t("Original {product} Formula"),
            t("{product} Best Price Online"),
            t("Try {product} Risk Free"),
            t("{product} Special Discount"),
            t("Fast Shipping On {product}"),
            t("{product} Reviews & Results"),
            t("Secure Checkout - Order Now"),
            t("Official {product} Store"),
        ],
    },
    LocaleResource {
        tag: "en",
        field: CopyField::Descriptions,
        templates: &[
            t("Order {product} from the official website. Fast, discreet shipping and secure checkout."),
            t("{product} now only {price}. Order today and save with the official online offer."),
            t("Backed by a {guarantee}-day money-back guarantee. Try {product} risk free today."),
            t("Discover why customers choose {product}. Limited stock at a special price."),
            t("Genuine {product} with secure payment and friendly support. Order in minutes."),
        ],
    },
    LocaleResource {
        tag: "en",
        field: CopyField::Sitelinks,
        templates: &[
            c("official", "Official Website"),
            c("offer", "Special Offer"),
            c("shipping", "Shipping Information"),
            c("guarantee", "Money-Back Guarantee"),
        ],
    },
    LocaleResource {
        tag: "en",
        field: CopyField::Callouts,
        templates: &[
            c("shipping", "Fast Shipping"),
            c("payment", "Secure Checkout"),
            c("trust", "Official Store"),
            c("support", "Customer Support"),
        ],
    },
    LocaleResource {
        tag: "en",
        field: CopyField::Snippets,
        templates: &[
            c("Types", "Single Pack"),
            c("Types", "Value Bundle"),
            c("Types", "Best Seller Pack"),
        ],
    },
    // ---------------------------------------------------------------- it
    LocaleResource {
        tag: "it",
        field: CopyField::Headlines,
        templates: &[
            t("Compra {product} Ora"),
            t("{product} Sito Ufficiale"),
            t("{product} Originale"),
            t("Ordina {product} Online"),
            t("{product} a Soli {price}"),
            t("Garanzia {guarantee} Giorni"),
            t("Offerta Speciale {product}"),
            t("{product} Prezzo Migliore"),
            t("Prova {product} Oggi"),
            t("Sconto Limitato su {product}"),
            t("{product} Recensioni"),
            t("Spedizione Veloce e Sicura"),
        ],
    },
    LocaleResource {
        tag: "it",
        field: CopyField::Descriptions,
        templates: &[
            t("Ordina {product} dal sito ufficiale. Spedizione rapida e pagamento sicuro."),
            t("{product} ora a soli {price}. Ordina oggi e approfitta dell'offerta ufficiale."),
            t("Soddisfatti o rimborsati entro {guarantee} giorni. Prova {product} senza rischi."),
            t("Scopri perché i clienti scelgono {product}. Scorte limitate a prezzo speciale."),
        ],
    },
    LocaleResource {
        tag: "it",
        field: CopyField::Sitelinks,
        templates: &[
            c("official", "Sito Ufficiale"),
            c("offer", "Offerta Speciale"),
            c("shipping", "Spedizioni"),
            c("guarantee", "Garanzia di Rimborso"),
        ],
    },
    LocaleResource {
        tag: "it",
        field: CopyField::Callouts,
        templates: &[
            c("shipping", "Spedizione Rapida"),
            c("payment", "Pagamento Sicuro"),
            c("trust", "Negozio Ufficiale"),
            c("support", "Assistenza Clienti"),
        ],
    },
    LocaleResource {
        tag: "it",
        field: CopyField::Snippets,
        templates: &[
            c("Tipi", "Confezione Singola"),
            c("Tipi", "Pacchetto Convenienza"),
            c("Tipi", "Il Più Venduto"),
        ],
    },
    // ---------------------------------------------------------------- es
    LocaleResource {
        tag: "es",
        field: CopyField::Headlines,
        templates: &[
            t("Compra {product} Ahora"),
            t("{product} Sitio Oficial"),
            t("{product} Original"),
            t("Pide {product} Online"),
            t("{product} Solo {price}"),
            t("Garantía de {guarantee} Días"),
            t("Oferta Especial {product}"),
            t("Prueba {product} Hoy"),
            t("Envío Rápido y Seguro"),
        ],
    },
    LocaleResource {
        tag: "es",
        field: CopyField::Descriptions,
        templates: &[
            t("Pide {product} en la web oficial. Envío rápido y pago seguro."),
            t("{product} ahora solo {price}. Pide hoy y aprovecha la oferta oficial."),
            t("Garantía de devolución de {guarantee} días. Prueba {product} sin riesgos."),
        ],
    },
    LocaleResource {
        tag: "es",
        field: CopyField::Sitelinks,
        templates: &[
            c("official", "Sitio Oficial"),
            c("offer", "Oferta Especial"),
            c("shipping", "Información de Envío"),
            c("guarantee", "Garantía de Devolución"),
        ],
    },
    LocaleResource {
        tag: "es",
        field: CopyField::Callouts,
        templates: &[
            c("shipping", "Envío Rápido"),
            c("payment", "Pago Seguro"),
            c("trust", "Tienda Oficial"),
            c("support", "Atención al Cliente"),
        ],
    },
    // ---------------------------------------------------------------- pt
    LocaleResource {
        tag: "pt",
        field: CopyField::Headlines,
        templates: &[
            t("Compre {product} Agora"),
            t("{product} Site Oficial"),
            t("{product} Original"),
            t("Encomende {product} Online"),
            t("{product} Por Apenas {price}"),
            t("Garantia de {guarantee} Dias"),
            t("Oferta Especial {product}"),
            t("Experimente {product} Hoje"),
        ],
    },
    LocaleResource {
        tag: "pt-BR",
        field: CopyField::Headlines,
        templates: &[
            t("Compre {product} Agora"),
            t("{product} Site Oficial"),
            t("{product} Original"),
            t("Peça {product} Online"),
            t("{product} Por Apenas {price}"),
            t("Garantia de {guarantee} Dias"),
            t("Frete Grátis {product}"),
            t("Promoção {product} Hoje"),
        ],
    },
    LocaleResource {
        tag: "pt",
        field: CopyField::Descriptions,
        templates: &[
            t("Compre {product} no site oficial. Envio rápido e pagamento seguro."),
            t("{product} agora por apenas {price}. Compre hoje com a oferta oficial."),
            t("Garantia de reembolso de {guarantee} dias. Experimente {product} sem riscos."),
        ],
    },
    LocaleResource {
        tag: "pt",
        field: CopyField::Callouts,
        templates: &[
            c("shipping", "Envio Rápido"),
            c("payment", "Pagamento Seguro"),
            c("trust", "Loja Oficial"),
            c("support", "Suporte ao Cliente"),
        ],
    },
    // ---------------------------------------------------------------- fr
    LocaleResource {
        tag: "fr",
        field: CopyField::Headlines,
        templates: &[
            t("Achetez {product} Maintenant"),
            t("{product} Site Officiel"),
            t("{product} Original"),
            t("Commandez {product} en Ligne"),
            t("{product} Seulement {price}"),
            t("Garantie {guarantee} Jours"),
            t("Offre Spéciale {product}"),
            t("Essayez {product} Aujourd'hui"),
        ],
    },
    LocaleResource {
        tag: "fr",
        field: CopyField::Descriptions,
        templates: &[
            t("Commandez {product} sur le site officiel. Livraison rapide et paiement sécurisé."),
            t("{product} maintenant à seulement {price}. Profitez de l'offre officielle."),
            t("Satisfait ou remboursé pendant {guarantee} jours. Essayez {product} sans risque."),
        ],
    },
    // ---------------------------------------------------------------- de
    LocaleResource {
        tag: "de",
        field: CopyField::Headlines,
        templates: &[
            t("{product} Jetzt Kaufen"),
            t("{product} Offizielle Seite"),
            t("{product} Original"),
            t("{product} Online Bestellen"),
            t("{product} Nur {price}"),
            t("{guarantee} Tage Geld-Zurück"),
            t("Sonderangebot {product}"),
            t("{product} Heute Testen"),
        ],
    },
    LocaleResource {
        tag: "de",
        field: CopyField::Descriptions,
        templates: &[
            t("Bestellen Sie {product} im offiziellen Shop. Schneller Versand, sichere Zahlung."),
            t("{product} jetzt für nur {price}. Heute bestellen und das Angebot nutzen."),
            t("{guarantee} Tage Geld-zurück-Garantie. Testen Sie {product} ohne Risiko."),
        ],
    },
];
