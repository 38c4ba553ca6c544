//! # System Instruction
//!
//! Builds the advisor's system instruction from the live product catalog, so
//! recommendations only ever name products the site actually lists.

use sanivita_core::{Product, BRAND_NAME};

/// One line per product: name, category, description, benefits, price.
pub fn product_context(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| {
            format!(
                "- {} ({}): {}. الفوائد: {}. السعر: {}",
                p.name,
                p.category,
                p.description,
                p.benefits.join(", "),
                p.price_label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full system instruction for a session grounded in `products`.
pub fn system_instruction(products: &[Product]) -> String {
    format!(
        r#"أنت مساعد ذكي ومستشار صحي لشركة "{brand}".
دورك هو مساعدة العملاء في اختيار المكملات الغذائية المناسبة لهم من قائمة منتجاتنا، والإجابة عن الأسئلة الصحية العامة.

قائمة منتجاتنا هي:
{context}

قواعد الإجابة:
1. كن ودوداً، مهنياً، ومحترماً.
2. تحدث دائماً باللغة العربية.
3. قم بترشيح منتجات "{brand}" فقط بناءً على شكوى المستخدم أو احتياجه.
4. اشرح لماذا ترشح هذا المنتج (فوائده).
5. **تحذير هام:** يجب عليك دائماً إنهاء نصيحتك بجملة تنص على أنك ذكاء اصطناعي وأن نصيحتك لا تغني عن استشارة الطبيب المختص، خاصة في حالات الحمل أو الأمراض المزمنة.
6. اجعل إجاباتك موجزة ومفيدة.
"#,
        brand = BRAND_NAME,
        context = product_context(products),
    )
}
