// LLM prompt templates for the four generation tasks.
// Placeholders in `{braces}` are filled by prompt_builder; shared fragments
// come from llm_client::prompts.

/// Hooks prompt. Replace: {product_info}, {hook_library}, {json_only}
pub const HOOKS_PROMPT_TEMPLATE: &str = r#"You are an expert TikTok content strategist specializing in jewelry marketing.

Product Information:
{product_info}

Available Hook Library:
{hook_library}

Based on the product information provided, select the 5 most relevant and effective hooks from the library above, or write equivalent hooks in the same spirit where the library falls short. Justify each choice. Consider:
- Product type and features
- Target audience appeal
- Viral potential on TikTok
- Emotional connection

Return your response as a JSON array with this exact format:
[
  {
    "id": "hook_id",
    "text": "hook text",
    "description": "why this hook works for this product"
  }
]

{json_only}"#;

/// Angles prompt. Replace: {product_info}, {selected_hook}, {json_only}
pub const ANGLES_PROMPT_TEMPLATE: &str = r#"You are an expert TikTok content strategist specializing in jewelry marketing.

Product Information:
{product_info}

Selected Hook: "{selected_hook}"

Generate exactly 5 distinct angle variations for how this hook can be developed into a compelling TikTok video. Each angle should represent a different narrative approach or creative interpretation.

Consider these angle types:
- Emotional storytelling
- Educational/informative
- Behind-the-scenes
- Lifestyle/aspirational
- Problem-solution
- Unboxing/reveal
- Comparison/before-after
- Trend-based

Return your response as a JSON array with this exact format:
[
  {
    "id": "angle_1",
    "title": "Angle Title",
    "description": "Detailed description of how this angle would work with the selected hook"
  }
]

Make each angle unique and tailored to jewelry marketing on TikTok. {json_only}"#;

/// Script prompt. Replace: {product_info}, {selected_hook}, {selected_angle}, {brand_voice}
pub const SCRIPT_PROMPT_TEMPLATE: &str = r#"You are an expert TikTok script writer specializing in jewelry marketing. Create a compelling 60-second TikTok script.

Product Information:
{product_info}

Selected Hook: "{selected_hook}"
Selected Angle: "{selected_angle}"

Create a complete 60-second TikTok script that:
- Opens with the selected hook
- Develops the narrative using the selected angle
- Maintains fast pacing suitable for TikTok
- Uses natural, conversational language (avoid forced transitions like "but then")
- Includes visual cues and on-screen text suggestions
- Has a strong call-to-action
- Stays authentic and relatable
- Optimizes for viewer retention

Format the script with:
- Timestamps (0-5s, 5-15s, etc.)
- Voiceover text
- Visual cues in [brackets]
- On-screen text suggestions in {curly braces}

{brand_voice}

Write the complete script now:"#;

/// Captions prompt. Replace: {product_url}, {content_type}, {additional_details},
/// {tone_guide}, {selected_tone}, {brand_voice}, {json_only}
pub const CAPTIONS_PROMPT_TEMPLATE: &str = r#"You are an expert social media copywriter specializing in jewelry marketing for State Property.

Product URL: {product_url}
Content Type: {content_type}
Additional Details: {additional_details}

Create 3 distinct social media captions for this {content_type}. Each caption should follow the guidance for its content type:

{tone_guide}

For this request apply the {content_type} guidance: {selected_tone}.

{brand_voice}

Each caption should:
- Be unique in tone and approach
- Include relevant hashtags
- Have a clear call-to-action
- Be optimized for engagement
- Maintain brand consistency

Return your response as a JSON array with this exact format:
["Caption 1 text here", "Caption 2 text here", "Caption 3 text here"]

{json_only}"#;
