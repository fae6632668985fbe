//! GraphQL documents sent to the storefront API.

/// Catalog query: products with their first image and variants.
pub fn products_query(products: u32, variants: u32) -> String {
    format!(
        r#"query getProducts {{
  products(first: {products}) {{
    edges {{
      node {{
        id
        title
        handle
        productType
        description
        priceRange {{
          minVariantPrice {{
            amount
            currencyCode
          }}
        }}
        images(first: 1) {{
          edges {{
            node {{
              url
            }}
          }}
        }}
        variants(first: {variants}) {{
          edges {{
            node {{
              id
              title
              price {{
                amount
                currencyCode
              }}
              availableForSale
              selectedOptions {{
                name
                value
              }}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#
    )
}

/// Cart creation mutation returning the hosted checkout URL.
pub const CART_CREATE_MUTATION: &str = r#"mutation createCart($cartInput: CartInput) {
  cartCreate(input: $cartInput) {
    cart {
      checkoutUrl
    }
    userErrors {
      field
      message
    }
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_query_page_sizes() {
        let query = products_query(20, 10);
        assert!(query.contains("products(first: 20)"));
        assert!(query.contains("variants(first: 10)"));
        assert!(query.contains("images(first: 1)"));
    }
}
