//! # Document Metadata
//!
//! Title, description and keywords written into the document head for each
//! view. Static pages carry fixed copy; detail views describe their entity.
//!
//! ```text
//! ┌────────────────────┬──────────────────────────────────────────────────┐
//! │ View               │ title / description                              │
//! ├────────────────────┼──────────────────────────────────────────────────┤
//! │ static page        │ Page::meta() table below                         │
//! │ ArticleDetail      │ article title / article excerpt                  │
//! │ ProductDetail      │ product name / product description               │
//! └────────────────────┴──────────────────────────────────────────────────┘
//! document title = "<title> | SaniVita Pharma"
//! ```

use serde::Serialize;

use crate::page::Page;
use crate::BRAND_NAME;

/// Head metadata for one rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<&'a str>,
}

impl<'a> PageMeta<'a> {
    pub const fn new(title: &'a str, description: &'a str) -> Self {
        PageMeta {
            title,
            description,
            keywords: None,
        }
    }

    pub const fn with_keywords(mut self, keywords: &'a str) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// `"<title> | SaniVita Pharma"`.
    pub fn document_title(&self) -> String {
        format!("{} | {}", self.title, BRAND_NAME)
    }
}

const SITE_DESCRIPTION: &str = "الطريقة الذكية للحفاظ على صحة عائلتك. نسعى لتقديم أفضل المكملات الغذائية المصنعة وفقاً لأعلى معايير الجودة العالمية.";

impl Page {
    /// Fixed head metadata. Detail pages share their list page's copy; the
    /// resolver replaces it with the entity's own when one is shown.
    pub const fn meta(&self) -> PageMeta<'static> {
        match self.list_page() {
            Page::Home => PageMeta::new(
                "الرئيسية",
                "في SaniVita Pharma، نمزج العلم بالطبيعة لنقدم لك مكملات غذائية عالية الجودة تساعدك على عيش حياة أكثر صحة وحيوية.",
            ),
            Page::Products => PageMeta::new(
                "منتجاتنا",
                "تصفح مجموعتنا المتميزة من المكملات الغذائية المصممة لتعزيز صحتك ورفاهيتك.",
            ),
            Page::Articles => PageMeta::new(
                "المقالات الطبية - نصائح صحية موثوقة",
                "اقرأ أحدث المقالات الطبية والنصائح الصحية من خبراء سانيفيتا فارما. معلومات عن المناعة، التغذية، صحة الأطفال، والجمال.",
            )
            .with_keywords("مقالات طبية, مدونة صحية, نصائح تغذية, صحة الطفل, مقالات سانيفيتا"),
            Page::About => PageMeta::new("من نحن", "قصتنا، رؤيتنا، والتزامنا بصحتك."),
            Page::Contact => PageMeta::new(
                "تواصل معنا - سانيفيتا فارما",
                "تواصل مع فريق سانيفيتا فارما. نحن هنا للإجابة على استفساراتك حول منتجاتنا أو لتقديم الدعم والمساعدة.",
            )
            .with_keywords("اتصل بنا, سانيفيتا, خدمة العملاء, عنوان الشركة"),
            Page::Advisor => PageMeta::new(
                "المستشار الذكي",
                "احصل على ترشيحات مخصصة لمنتجاتنا بناءً على احتياجاتك.",
            ),
            Page::Admin | Page::ArticleDetail | Page::ProductDetail => {
                PageMeta::new("لوحة التحكم", SITE_DESCRIPTION)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_articles_and_contact_carry_keywords() {
        let articles = Page::Articles.meta();
        assert_eq!(
            articles.document_title(),
            "المقالات الطبية - نصائح صحية موثوقة | SaniVita Pharma"
        );
        assert!(articles.keywords.unwrap().contains("مقالات طبية"));

        let contact = Page::Contact.meta();
        assert_eq!(contact.title, "تواصل معنا - سانيفيتا فارما");
        assert!(contact.keywords.is_some());
    }

    #[test]
    fn test_detail_pages_share_list_copy() {
        assert_eq!(Page::ArticleDetail.meta(), Page::Articles.meta());
        assert_eq!(Page::ProductDetail.meta(), Page::Products.meta());
    }

    #[test]
    fn test_every_page_has_a_description() {
        for page in Page::ALL {
            assert!(!page.meta().description.is_empty(), "page {page}");
        }
    }

    #[test]
    fn test_keywords_omitted_when_absent() {
        let json = serde_json::to_value(Page::About.meta()).unwrap();
        assert_eq!(json["title"], "من نحن");
        assert!(json.get("keywords").is_none());
    }
}
