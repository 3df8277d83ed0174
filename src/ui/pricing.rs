use crate::app::PromptForgeApp;
use crate::route::AppRoute;
use eframe::egui::{self, RichText};

struct Plan {
    name: &'static str,
    price: &'static str,
    period: &'static str,
    features: &'static [&'static str],
    cta: &'static str,
    popular: bool,
}

const PLANS: [Plan; 3] = [
    Plan {
        name: "Free",
        price: "$0",
        period: "forever",
        features: &[
            "5 projects per month",
            "Basic templates",
            "Community support",
            "Public projects only",
        ],
        cta: "Get Started",
        popular: false,
    },
    Plan {
        name: "Pro",
        price: "$29",
        period: "per month",
        features: &[
            "Unlimited projects",
            "Premium templates",
            "Priority support",
            "Private projects",
            "Custom domains",
            "Advanced analytics",
        ],
        cta: "Start Free Trial",
        popular: true,
    },
    Plan {
        name: "Team",
        price: "$99",
        period: "per month",
        features: &[
            "Everything in Pro",
            "Team collaboration",
            "SSO integration",
            "Advanced permissions",
            "Dedicated support",
            "Custom integrations",
        ],
        cta: "Contact Sales",
        popular: false,
    },
];

pub fn render(app: &mut PromptForgeApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().id_salt("pricing_page").show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(app.theme.spacing_24);
                ui.label(RichText::new("Pricing").size(26.0).strong());
                ui.label(
                    RichText::new(
                        "Choose the plan that's right for you and your team. Start building today.",
                    )
                    .color(app.theme.text_muted),
                );
                ui.add_space(app.theme.spacing_24);
            });

            let mut go_sign_up = false;
            ui.columns(PLANS.len(), |columns| {
                for (column, plan) in columns.iter_mut().zip(PLANS.iter()) {
                    let frame = app.theme.card_frame();
                    frame.show(column, |ui| {
                        if plan.popular {
                            ui.label(
                                RichText::new("Most popular")
                                    .small()
                                    .color(app.theme.accent_primary),
                            );
                        }
                        ui.label(RichText::new(plan.name).size(20.0).strong());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(plan.price).size(24.0).strong());
                            ui.label(RichText::new(plan.period).color(app.theme.text_muted));
                        });
                        ui.add_space(app.theme.spacing_8);
                        for feature in plan.features {
                            ui.label(format!("• {feature}"));
                        }
                        ui.add_space(app.theme.spacing_8);
                        if ui.button(plan.cta).clicked() {
                            go_sign_up = true;
                        }
                    });
                }
            });
            if go_sign_up {
                app.navigate(AppRoute::SignUp);
            }

            ui.add_space(app.theme.spacing_24);
            ui.vertical_centered(|ui| {
                ui.set_max_width(640.0);
                ui.label(RichText::new("Frequently asked questions").size(18.0).strong());
                for (question, answer) in [
                    (
                        "Can I change my plan later?",
                        "Yes, you can upgrade or downgrade your plan at any time. Changes take effect immediately.",
                    ),
                    (
                        "Is there a free trial?",
                        "Yes, we offer a 14-day free trial for our Pro plan. No credit card required.",
                    ),
                    (
                        "What payment methods do you accept?",
                        "We accept all major credit cards, PayPal, and wire transfers for enterprise customers.",
                    ),
                ] {
                    ui.add_space(app.theme.spacing_8);
                    ui.strong(question);
                    ui.label(RichText::new(answer).color(app.theme.text_muted));
                }
                ui.add_space(app.theme.spacing_24);
            });
        });
    });
}
