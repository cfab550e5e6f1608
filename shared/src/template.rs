//! 落地页模板选择
//!
//! 租户配置的模板名经归一化后映射到一个封闭集合，
//! 每个模板再确定性地映射到主题令牌与品牌文案。
//! 没有插件机制，新增模板就是新增一个枚举值和对应的 match 分支。

use serde::{Deserialize, Serialize};

/// 落地页模板（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingTemplate {
    /// 平台默认模板，也是所有无法识别配置的回退值
    #[default]
    Original,
    Minimal,
    FreshSpin,
    Starter,
}

impl LandingTemplate {
    /// 归一化解析模板名：小写并去除所有空白，无法识别时回退 `Original`
    ///
    /// `"Fresh Spin"`、`"freshspin"`、`" FreshSpin "` 解析为同一个模板。
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "minimal" => Self::Minimal,
            "freshspin" => Self::FreshSpin,
            "starter" => Self::Starter,
            _ => Self::Original,
        }
    }

    /// 模板的主题令牌
    pub fn theme(&self) -> ThemeTokens {
        match self {
            Self::Original => ThemeTokens {
                primary: "sky-600",
                accent: "cyan-400",
                surface: "base-100",
                hero_gradient: "from-sky-500 to-cyan-400",
            },
            Self::Minimal => ThemeTokens {
                primary: "neutral-800",
                accent: "neutral-500",
                surface: "base-200",
                hero_gradient: "from-neutral-700 to-neutral-500",
            },
            Self::FreshSpin => ThemeTokens {
                primary: "emerald-600",
                accent: "lime-400",
                surface: "base-100",
                hero_gradient: "from-emerald-500 to-lime-400",
            },
            Self::Starter => ThemeTokens {
                primary: "violet-600",
                accent: "fuchsia-400",
                surface: "base-100",
                hero_gradient: "from-violet-500 to-fuchsia-400",
            },
        }
    }

    /// 模板的品牌文案
    pub fn brand(&self) -> BrandContent {
        match self {
            Self::Original => BrandContent {
                tagline: "Laundry day, handled.",
                cta: "Schedule a pickup",
            },
            Self::Minimal => BrandContent {
                tagline: "Clean clothes. Nothing else.",
                cta: "Get started",
            },
            Self::FreshSpin => BrandContent {
                tagline: "Give your wardrobe a fresh spin.",
                cta: "Book your first wash",
            },
            Self::Starter => BrandContent {
                tagline: "Your neighborhood laundry, online.",
                cta: "Try it today",
            },
        }
    }
}

/// 主题令牌：具名颜色与渐变类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub primary: &'static str,
    pub accent: &'static str,
    pub surface: &'static str,
    pub hero_gradient: &'static str,
}

/// 品牌文案内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandContent {
    pub tagline: &'static str,
    pub cta: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_ignores_case_and_whitespace() {
        for name in ["Fresh Spin", "freshspin", " FreshSpin ", "FRESH\tSPIN"] {
            assert_eq!(LandingTemplate::from_name(name), LandingTemplate::FreshSpin);
        }
    }

    #[test]
    fn unrecognized_names_fall_back_to_original() {
        for name in ["", "fancy", "original-v2", "Fresh Spin Deluxe"] {
            assert_eq!(LandingTemplate::from_name(name), LandingTemplate::Original);
        }
    }

    #[test]
    fn every_template_resolves_deterministically() {
        let all = [
            LandingTemplate::Original,
            LandingTemplate::Minimal,
            LandingTemplate::FreshSpin,
            LandingTemplate::Starter,
        ];
        for template in all {
            assert_eq!(template.theme(), template.theme());
            assert_eq!(template.brand().tagline, template.brand().tagline);
        }
    }
}
