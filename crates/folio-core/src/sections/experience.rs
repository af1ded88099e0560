use crate::content::{ExperienceEntry, Project, EXPERIENCE, PROJECTS};
use crate::node::{MotionBinding, ViewNode};
use crate::stagger::OrdinalCounter;
use crate::variants::names;

fn work_entry(entry: &ExperienceEntry, ordinals: &mut OrdinalCounter) -> ViewNode {
    ViewNode::container()
        .animate(super::fade_in_up(ordinals))
        .child(
            ViewNode::row().child(ViewNode::icon("building")).child(
                ViewNode::container()
                    .child(ViewNode::heading(3, entry.company))
                    .child(ViewNode::paragraph(entry.position)),
            ),
        )
        .child(
            ViewNode::row()
                .child(ViewNode::icon("calendar"))
                .child(ViewNode::paragraph(entry.duration)),
        )
        .child(ViewNode::paragraph(entry.description))
}

/// Links are rendered only for the destinations a project actually has.
fn project_links(project: &Project) -> ViewNode {
    let links = [
        (project.live_demo, "Live Demo", "external-link"),
        (project.source, "GitHub", "github"),
    ];
    ViewNode::row().children(links.into_iter().filter_map(|(href, label, icon)| {
        href.map(|href| ViewNode::link(label, href).with_icon(icon).new_tab())
    }))
}

fn project_card(project: &Project, ordinals: &mut OrdinalCounter) -> ViewNode {
    ViewNode::container()
        .animate(MotionBinding::variant(names::PROJECT_CARD).index(ordinals.next()))
        .child(ViewNode::paragraph(format!("{} Preview", project.title)))
        .child(ViewNode::heading(3, project.title))
        .child(ViewNode::paragraph(project.description))
        .child(ViewNode::row().children(project.tech.iter().map(|t| ViewNode::badge(*t))))
        .child(project_links(project))
}

pub fn build() -> ViewNode {
    let mut ordinals = OrdinalCounter::new();
    let header = super::header("Work & Projects", "Experience & Portfolio", &mut ordinals);

    let work_title =
        ViewNode::heading(3, "Work Experience").animate(super::fade_in_up(&mut ordinals));
    let work = ViewNode::row().children(
        EXPERIENCE
            .iter()
            .map(|entry| work_entry(entry, &mut ordinals))
            .collect::<Vec<_>>(),
    );

    let projects_title =
        ViewNode::heading(3, "Featured Projects").animate(super::fade_in_up(&mut ordinals));
    let projects = ViewNode::row().children(
        PROJECTS
            .iter()
            .map(|project| project_card(project, &mut ordinals))
            .collect::<Vec<_>>(),
    );

    super::section(super::EXPERIENCE).child(
        super::reveal_container(0.1)
            .child(header)
            .child(ViewNode::container().child(work_title).child(work))
            .child(ViewNode::container().child(projects_title).child(projects)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn missing_links_are_not_rendered() {
        let project = Project {
            title: "Solo",
            description: "No demo.",
            tech: &[],
            live_demo: None,
            source: Some("https://example.com/solo"),
        };
        let links = project_links(&project);
        assert_eq!(links.children.len(), 1);
        assert!(matches!(
            &links.children[0].kind,
            NodeKind::Link { label, external: true, icon: Some("github"), .. } if label == "GitHub"
        ));
    }

    #[test]
    fn cards_continue_the_section_ordinals() {
        let section = build();
        let mut cards = Vec::new();
        section.walk(&mut |_, _, node| {
            if let Some(binding) = node.motion.as_ref().filter(|b| b.variant == names::PROJECT_CARD) {
                cards.push(binding.custom);
            }
        });
        assert_eq!(cards, vec![Some(5.0), Some(6.0), Some(7.0)]);
    }
}
