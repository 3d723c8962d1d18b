// Prompt Templates
// Instruction text sent to the generation service, plus deterministic
// cleanup of enhancement responses

use once_cell::sync::Lazy;
use regex::Regex;

static ENHANCED_LEAD_IN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Enhanced version:\s*").expect("valid lead-in pattern"));

static IMPROVED_LEAD_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Here(?:'s| is) the improved version:\s*").expect("valid lead-in pattern")
});

/// Build the site-generation instruction for a user prompt.
///
/// The model is asked to wrap the whole site in a single JSON object; the
/// parser tolerates prose around it.
pub fn build_site_prompt(prompt: &str) -> String {
    format!(
        r#"Generate complete website code for: "{prompt}". Provide response in this JSON format:
{{
  "files": [
    {{
      "name": "index.html",
      "content": "<!DOCTYPE html><html>...</html>"
    }},
    {{
      "name": "style.css",
      "content": "body {{ ... }}"
    }},
    {{
      "name": "script.js",
      "content": "function ..."
    }}
  ],
  "message": "Your generated website is ready!",
  "steps": [
    "1. Created HTML structure with semantic elements",
    "2. Designed responsive layout with CSS Grid/Flexbox",
    "3. Added interactive functionality with JavaScript",
    "4. Styled components with modern CSS features",
    "5. Optimized for performance and accessibility"
  ]
}}

CONTENT REQUIREMENTS:
1. For ALL websites:
   - Mobile-responsive design
   - Semantic HTML5
   - Functional JavaScript
   - Pixel-perfect alignment using CSS Grid/Flexbox
   - Comprehensive color scheme with CSS variables
   - Consistent spacing system (rem units)

2. SCROLLING REQUIREMENTS:
   - Ensure the page has enough content to naturally scroll vertically
   - Add 'scroll-behavior: smooth' to the HTML element
   - Ensure no parent elements have 'overflow: hidden' that would prevent scrolling

3. For clones of specific platforms (e.g., Instagram, Zomato):
   - Create a pixel-perfect landing page that closely resembles the original platform
   - Use the actual brand name, logo (SVG preferred), and color scheme
   - Follow the original platform's design language and layout structure

Important:
- Implement all key features requested in the prompt
- Ensure all interactive elements work (buttons, forms, etc.)
- Use realistic placeholder image links automatically where relevant:
  - Profile pictures -> https://i.pravatar.cc/150
  - Post or feed images -> https://picsum.photos/300
  - Banners or cover images -> https://placehold.co/600x200
- Place these image URLs directly in <img> tags wherever visual content usually appears."#
    )
}

/// Build the prompt-enhancement instruction for a user prompt
pub fn build_enhance_prompt(prompt: &str) -> String {
    format!(
        r#"Improve this website prompt to make it more detailed and specific in maximum 4-5 lines.
Keep the same core idea but add more concrete details about features, styling,
and functionality. Return ONLY the enhanced version with no additional commentary,
just return the enhanced prompt as a string:

Original: "{prompt}"
If the prompt includes phrases like "clone Instagram" or "make Zomato", generate a
pixel-perfect landing page of that platform with realistic placeholder images and
actual layout structure."#
    )
}

/// Strip quoting and known boilerplate lead-ins from an enhancement
/// response. Deterministic: the same raw text always cleans to the same
/// result.
pub fn clean_enhanced_response(raw: &str) -> String {
    let unquoted = raw.replace('"', "");
    let trimmed = unquoted.trim();
    let stripped = ENHANCED_LEAD_IN.replace(trimmed, "");
    let stripped = IMPROVED_LEAD_IN.replace(&stripped, "");
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_prompt_embeds_user_text() {
        let prompt = build_site_prompt("a bakery landing page");
        assert!(prompt.contains("\"a bakery landing page\""));
        assert!(prompt.contains("\"files\""));
        assert!(prompt.contains("\"steps\""));
    }

    #[test]
    fn test_enhance_prompt_embeds_user_text() {
        let prompt = build_enhance_prompt("make a portfolio");
        assert!(prompt.contains("\"make a portfolio\""));
        assert!(prompt.contains("ONLY the enhanced version"));
    }

    #[test]
    fn test_clean_strips_quotes() {
        assert_eq!(
            clean_enhanced_response("\"A sleek portfolio site\""),
            "A sleek portfolio site"
        );
    }

    #[test]
    fn test_clean_strips_lead_ins() {
        assert_eq!(
            clean_enhanced_response("Enhanced version: A sleek portfolio site"),
            "A sleek portfolio site"
        );
        assert_eq!(
            clean_enhanced_response("here's the improved version: A sleek portfolio site"),
            "A sleek portfolio site"
        );
        assert_eq!(
            clean_enhanced_response("Here is the improved version: A sleek portfolio site"),
            "A sleek portfolio site"
        );
    }

    #[test]
    fn test_clean_is_deterministic() {
        let raw = "  \"Enhanced version: Build a blog\"  ";
        assert_eq!(clean_enhanced_response(raw), clean_enhanced_response(raw));
        assert_eq!(clean_enhanced_response(raw), "Build a blog");
    }

    #[test]
    fn test_clean_can_produce_empty() {
        assert_eq!(clean_enhanced_response("\"\"  "), "");
    }
}
