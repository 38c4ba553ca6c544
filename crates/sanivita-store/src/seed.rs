//! # Seed Catalog
//!
//! The content shipped with the site. Used when storage holds no collection
//! (first visit) or holds one that cannot be parsed.

use sanivita_core::{Article, Catalog, Product};

const PLACEHOLDER_IMAGE: &str =
    "https://lh3.googleusercontent.com/d/1oGtLLr47LduwrdW-pFeXEqN3jC7tr8tT";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    benefits: &[&str],
    image: &str,
    price: &str,
    icon: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        benefits: strings(benefits),
        image: image.to_string(),
        price: Some(price.to_string()),
        icon: icon.to_string(),
    }
}

/// Seed products, in catalog order.
pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "ابسيمارتا شراب",
            "صحة الجهاز التنفسي",
            "مذيب للبلغم و موسع للشعب الهوائية، يعمل كمضاد للالتهاب ويرطب مجرى التنفس ليساعد على تهدئة السعال.",
            &["مذيب للبلغم وموسع للشعب", "مضاد للالتهاب", "يرطب مجرى التنفس ويهدئ السعال"],
            "https://lh3.googleusercontent.com/d/1jB1akFALfC5pre2cCvnigXFSxYgecunN",
            "55 ج.م",
            "wind",
        ),
        product(
            "2",
            "لابينسيرون شراب",
            "الحديد والمناعة",
            "تركيبة مميزة تحتوي على الحديد ومالتي فيتامين وفيتامين سي وزينك بطعم التوتي فروتي. يدعم تكوين الهيموجلوبين في الدم.",
            &["زيادة الهيموجلوبين", "فاتح للشهية", "مجدد للطاقة", "زيادة التركيز", "رفع المناعة"],
            "https://lh3.googleusercontent.com/d/1zB5VHzB-QiQVRmlLTnGGKx1AB1fHR6oo",
            "65 ج.م",
            "shield",
        ),
        product(
            "3",
            "ابينسيكال شراب",
            "صحة العظام والنمو",
            "مكمل غذائي غني بالكالسيوم والزنك وفيتامين د3 والمغنسيوم. تركيبة مميزة لصحة أفضل بطعم البرتقال.",
            &["عظام صحية", "أسنان قوية", "بنيان عضلي قوي", "رفع المناعة"],
            "https://lh3.googleusercontent.com/d/1cizVQkjJuBLvxfSEzJ1G6UmiCh-X6efl",
            "60 ج.م",
            "activity",
        ),
        product(
            "4",
            "SPI Product",
            "صحة عامة",
            "منتج مميز قادم قريبا",
            &["1", "2", "3"],
            PLACEHOLDER_IMAGE,
            "قريباً",
            "heart",
        ),
        product(
            "5",
            "SPI Product",
            "الجمال",
            "منتج مميز قادم قريبا",
            &["1", "2", "3"],
            PLACEHOLDER_IMAGE,
            "قريباً",
            "sparkles",
        ),
        product(
            "6",
            "SPI Product",
            "العظام",
            "منتج مميز قادم قريبا",
            &["1", "2", "3"],
            PLACEHOLDER_IMAGE,
            "قريباً",
            "activity",
        ),
    ]
}

/// Seed articles, newest first.
pub fn articles() -> Vec<Article> {
    vec![
        Article {
            id: "1".to_string(),
            title: "كيف تقوي مناعة طفلك في الشتاء؟".to_string(),
            excerpt: "نصائح بسيطة وعملية لحماية أطفالك من نزلات البرد المتكررة خلال فصل الشتاء."
                .to_string(),
            content: strings(&[
                "يتعرض الأطفال في فصل الشتاء لنزلات البرد بشكل متكرر بسبب ضعف المناعة وتقلب الطقس.",
                "الغذاء المتوازن الغني بالخضروات والفواكه هو خط الدفاع الأول، ويساعد الحديد والزنك وفيتامين سي على دعم الجهاز المناعي.",
                "احرص على النوم الكافي وغسل اليدين باستمرار، واستشر الطبيب قبل إعطاء أي مكمل غذائي.",
            ]),
            image: PLACEHOLDER_IMAGE.to_string(),
            date: "15/1/2025".to_string(),
            author: "فريق SaniVita".to_string(),
            category: "صحة الأطفال".to_string(),
            read_time: "4 دقائق".to_string(),
        },
        Article {
            id: "2".to_string(),
            title: "الكالسيوم وفيتامين د: شراكة من أجل عظام قوية".to_string(),
            excerpt: "لماذا يحتاج الجسم إلى فيتامين د لامتصاص الكالسيوم، وما المصادر الطبيعية لكل منهما؟"
                .to_string(),
            content: strings(&[
                "الكالسيوم هو المكون الأساسي للعظام والأسنان، لكن الجسم لا يستطيع امتصاصه بكفاءة دون فيتامين د.",
                "التعرض المعتدل لأشعة الشمس ومنتجات الألبان والأسماك الدهنية من أهم المصادر الطبيعية.",
                "في مراحل النمو السريع قد يوصي الطبيب بمكمل يجمع بين الكالسيوم وفيتامين د3 والزنك والمغنسيوم.",
            ]),
            image: PLACEHOLDER_IMAGE.to_string(),
            date: "2/1/2025".to_string(),
            author: "فريق SaniVita".to_string(),
            category: "تغذية".to_string(),
            read_time: "3 دقائق".to_string(),
        },
        Article {
            id: "3".to_string(),
            title: "السعال عند الأطفال: متى يجب القلق؟".to_string(),
            excerpt: "دليل سريع للتفرقة بين السعال العادي والحالات التي تستدعي زيارة الطبيب."
                .to_string(),
            content: strings(&[
                "السعال رد فعل طبيعي يساعد الجسم على التخلص من البلغم والمهيجات.",
                "إذا استمر السعال أكثر من أسبوعين أو صاحبه ارتفاع في الحرارة أو صعوبة في التنفس فيجب مراجعة الطبيب فوراً.",
            ]),
            image: PLACEHOLDER_IMAGE.to_string(),
            date: "20/12/2024".to_string(),
            author: "فريق SaniVita".to_string(),
            category: "صحة عامة".to_string(),
            read_time: "3 دقائق".to_string(),
        },
    ]
}

/// Both seed collections.
pub fn catalog() -> Catalog {
    Catalog::new(articles(), products())
}
