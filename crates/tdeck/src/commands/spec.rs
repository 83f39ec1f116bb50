use colored::Colorize;

const FULL: &str = r#"Slides are plain markdown, separated by a line of three dashes:

    # First slide

    ---

    # Second slide

Blocks
  # Heading        level = number of hashes; H1/H2 get an underline rule
  - item           lists nest by 2-space indentation steps
  ```lang          fenced code, rendered in a tinted block and
  ```              syntax-highlighted when the language is known
  ![alt](path)     image, drawn with half-block cells, path relative
                   to the presented file
  anything else    a paragraph, centered

Directives (HTML comments, attach to the slide they appear in)
  <!-- fg=white bg=red -->      slide colors: black red green yellow
                                blue magenta cyan white
  <!-- effect=explosions -->    transition when entering the slide;
                                effects: explosions, stars. Effects
                                cannot combine with colors or code.

Frontmatter (optional, at the very top)
  ---
  title: My talk
  author: Me
  theme: dark      dark | light, the code-tint palette
  ---

Keys
  n / right        next slide
  b / left         previous slide
  q                quit
"#;

const SHORT: &str = r#"---            slide separator      <!-- fg=X bg=Y -->   colors
# Heading      underlined title     <!-- effect=E -->    transition
- item         2-space nesting      ![alt](path)         image
```lang        tinted code block    n/b/q                navigate
"#;

pub fn run(short: bool) {
    println!("{}", "tdeck slide format".bold());
    println!();
    print!("{}", if short { SHORT } else { FULL });
}
