use crate::domain::entities::product::ProductRecord;
use crate::domain::ports::generation_port::TextGenerator;
use std::sync::Arc;

pub struct ComposeUseCase {
    generator: Arc<dyn TextGenerator>,
    assistant_name: String,
}

impl ComposeUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>, assistant_name: impl Into<String>) -> Self {
        Self {
            generator,
            assistant_name: assistant_name.into(),
        }
    }

    /// One line per product: name, price, category, aisle.
    pub fn build_context(products: &[ProductRecord]) -> String {
        products
            .iter()
            .map(ProductRecord::context_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn build_prompt(&self, query: &str, products: &[ProductRecord]) -> String {
        format!(
            "You are a friendly and helpful in-store shopping assistant named {name}.\n\
             Your goal is to answer the user's question based ONLY on the product information provided below.\n\
             Do not make up information. If the answer is not in the provided context, say that you couldn't find the information.\n\
             If you find multiple relevant items, you MUST mention them by their full and exact product name. Be conversational and concise.\n\
             \n\
             CONTEXT:\n\
             {context}\n\
             \n\
             USER'S QUESTION:\n\
             {query}\n\
             \n\
             ANSWER:\n",
            name = self.assistant_name,
            context = Self::build_context(products),
            query = query,
        )
    }

    /// Generated answer, or the fallback message for whatever went wrong.
    /// Never fails: products are still worth returning without an answer.
    pub async fn execute(&self, query: &str, products: &[ProductRecord]) -> String {
        let prompt = self.build_prompt(query, products);
        match self.generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                let kind = e.fallback();
                tracing::warn!(provider = self.generator.name(), fallback = %kind, error = %e, "generation failed");
                kind.message().to_string()
            }
        }
    }
}
