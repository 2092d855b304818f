//! Integration tests for dialogbox.
//!
//! These tests drive the public API from outside the crate: command scripts
//! go in through the [`Pilot`] or the [`App`] loop, and the widget tree,
//! cursors and report lines are checked on the way out.

use dialogbox::app::{App, DialogConfig};
use dialogbox::engine::{CommandError, Outcome};
use dialogbox::focus::linearize;
use dialogbox::render::{HeadlessRenderer, ReportLog};
use dialogbox::testing::{outline, Pilot};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Tree shape
// ---------------------------------------------------------------------------

#[test]
fn test_groupbox_and_default_button_outline() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add groupbox Options opts\n\
         add checkbox Fast fast checked\n\
         end\n\
         add pushbutton Ok ok apply exit default\n",
    );
    insta::assert_snapshot!(outline(pilot.document()), @r#"
    dialog "dialogbox"
      row
        column
          groupbox "Options" #opts
            checkbox "Fast" #fast [checked]
          pushbutton "Ok" #ok [default]
    "#);
}

#[test]
fn test_tab_pages_outline() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add tabs t\n\
         add page One p1\n\
         add label First l1\n\
         end\n\
         add page Two p2\n\
         add checkbox Second c2\n\
         end tabs\n\
         add label After after\n",
    );
    insta::assert_snapshot!(outline(pilot.document()), @r#"
    dialog "dialogbox"
      row
        column
          tabs #t
            page "One" #p1
              row
                column
                  label "First" #l1
            page "Two" #p2
              row
                column
                  checkbox "Second" #c2
          label "After" #after
    "#);
    assert_eq!(pilot.cursors().tabs, None);
}

#[test]
fn test_disabled_and_hidden_flags_outline() {
    let mut pilot = Pilot::new();
    pilot.run("add groupbox G g\nadd checkbox C c\nend\ndisable g\nhide g\n");
    insta::assert_snapshot!(outline(pilot.document()), @r#"
    dialog "dialogbox"
      row
        column
          groupbox "G" #g [disabled hidden]
            checkbox "C" #c
    "#);
}

#[test]
fn test_names_resolve_to_their_nodes() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add label A a\n\
         add groupbox G g\n\
         add checkbox B b\n\
         end\n\
         step vertical\n\
         add textbox C c\n\
         add listbox L l\n",
    );
    let doc = pilot.document();
    for (name, caption) in [("a", "A"), ("g", "G"), ("b", "B"), ("c", "C"), ("l", "L")] {
        let node = pilot.named(name);
        assert_eq!(doc.name(node), Some(name));
        assert_eq!(doc.control(node).map(|control| control.caption()), Some(caption));
    }
}

#[test]
fn test_end_then_add_keeps_nesting_depth() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add groupbox A a\nend\nadd groupbox B b\nend\n\
         add listbox L1 l1\nadd item x\nend\nadd listbox L2 l2\n",
    );
    let doc = pilot.document();
    let (a, b) = (pilot.named("a"), pilot.named("b"));
    assert_eq!(doc.parent(a), doc.parent(b));
    assert_eq!(doc.ancestors(a).len(), doc.ancestors(b).len());
    let (l1, l2) = (pilot.named("l1"), pilot.named("l2"));
    assert_eq!(doc.parent(l1), doc.parent(l2));
}

#[test]
fn test_group_round_trip_restores_shape() {
    let mut pilot = Pilot::new();
    let before = outline(pilot.document());
    let cursors = pilot.cursors().clone();
    pilot.run("add groupbox G g\nend\nremove g\n");
    assert_eq!(outline(pilot.document()), before);
    assert_eq!(pilot.cursors(), &cursors);
}

#[test]
fn test_repeated_steps_leave_one_empty_column() {
    let mut pilot = Pilot::new();
    pilot.run("add label A a\nstep vertical\nstep vertical\n");
    insta::assert_snapshot!(outline(pilot.document()), @r#"
    dialog "dialogbox"
      row
        column
          label "A" #a
      row
        column
    "#);

    pilot.run("step\nstep\n");
    let doc = pilot.document();
    let empty_columns = doc
        .walk_depth_first(doc.root())
        .into_iter()
        .filter(|&id| doc.is_column(id) && doc.children(id).is_empty())
        .count();
    assert_eq!(empty_columns, 1);
}

#[test]
fn test_clear_resets_dialog() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add label A a\n\
         add tabs t\n\
         add page P p\n\
         add label B b\n\
         end tabs\n\
         step vertical\n\
         add pushbutton Ok ok default\n\
         clear\n",
    );
    insta::assert_snapshot!(outline(pilot.document()), @r#"
    dialog "dialogbox"
      row
        column
    "#);
    assert_eq!(pilot.cursors().default_button, None);
}

// ---------------------------------------------------------------------------
// Focus order
// ---------------------------------------------------------------------------

#[test]
fn test_linearize_is_stable() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add pushbutton A a\n\
         add groupbox G g\n\
         add checkbox B b\n\
         end\n\
         step\n\
         add textbox C c\n",
    );
    let doc = pilot.document();
    let first = linearize(doc, doc.root());
    let second = linearize(doc, doc.root());
    assert_eq!(first, second);
    assert_eq!(pilot.tab_order("a"), ["a", "b", "c"]);
}

#[test]
fn test_tab_pages_have_their_own_order() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add tabs t\nadd page One p1\nadd checkbox C c\nend tabs\nadd pushbutton Ok ok\n",
    );
    assert_eq!(pilot.tab_order("c"), ["c"]);
    assert_eq!(pilot.tab_order("ok"), ["t", "ok"]);
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn test_set_text_then_query() {
    let mut pilot = Pilot::new();
    pilot.run("add label \"Hi\" myLabel\nset myLabel text \"Bye\"\nquery\n");
    assert_eq!(pilot.take_reports(), ["myLabel=Bye"]);
}

#[test]
fn test_checked_checkbox_query() {
    let mut pilot = Pilot::new();
    pilot.run("add checkbox \"Go\" cb checked\nquery\n");
    assert_eq!(pilot.take_reports(), ["cb=1"]);
}

#[test]
fn test_remove_item_by_title() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add listbox \"L\" lb\n\
         add item \"x\"\n\
         add item \"y\" \"\" current\n\
         remove lb:y\n\
         query\n",
    );
    assert_eq!(pilot.take_reports(), ["lb=x"]);
    insta::assert_snapshot!(outline(pilot.document()), @r#"
    dialog "dialogbox"
      row
        column
          listbox "L" #lb
            item "x" *
    "#);
}

#[test]
fn test_query_reports_root_page_before_tab_pages() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add tabs t\n\
         add page One p1\n\
         add label First l1\n\
         end\n\
         add page Two p2\n\
         add checkbox Second c2\n\
         end tabs\n\
         add label After after\n\
         query\n",
    );
    assert_eq!(pilot.take_reports(), ["after=After", "l1=First", "c2=0"]);
}

#[test]
fn test_disabled_group_hides_its_controls_from_query() {
    let mut pilot = Pilot::new();
    pilot.run("add groupbox G g\nadd checkbox C c checked\nend\ndisable g\nquery\n");
    assert!(pilot.take_reports().is_empty());
    pilot.run("enable g\nquery\n");
    assert_eq!(pilot.take_reports(), ["c=1"]);
}

#[test]
fn test_cleared_list_reports_empty_value() {
    let mut pilot = Pilot::new();
    pilot.run("add listbox L lb\nadd item a\nadd item b\nend\nclear lb\nquery\n");
    assert_eq!(pilot.take_reports(), ["lb="]);
}

#[test]
fn test_commands_without_effect_are_skipped() {
    let mut pilot = Pilot::new();
    let errors = pilot.try_run("add item orphan\nadd page Lost\nset ghost text x\nadd label Ok ok\n");
    assert_eq!(
        errors,
        vec![
            CommandError::NoOpenList,
            CommandError::NoOpenTabs,
            CommandError::UnknownName("ghost".into()),
        ]
    );
    assert!(pilot.document().find_named("ok").is_some());
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

#[test]
fn test_apply_exit_accepts() {
    let mut pilot = Pilot::new();
    pilot.run(
        "add textbox Name name\n\
         add slider level 0 10\n\
         add pushbutton Ok ok apply exit default\n",
    );
    pilot.type_text("name", "Ann").expect("type");
    pilot.move_slider("level", 7).expect("move");
    pilot.take_reports();

    pilot.click("ok").expect("click");
    assert_eq!(pilot.take_reports(), ["ok=clicked", "name=Ann", "level=7"]);
    assert_eq!(pilot.outcome(), Some(Outcome::Accepted));
    assert_eq!(pilot.outcome().map(Outcome::exit_code), Some(1));
}

#[test]
fn test_closing_the_window_rejects() {
    let mut pilot = Pilot::new();
    pilot.run("add checkbox Go go\n");
    pilot.close();
    assert_eq!(pilot.outcome(), Some(Outcome::Rejected));
    assert!(pilot.take_reports().is_empty());
}

#[test]
fn test_selection_reports_follow_the_user() {
    let mut pilot = Pilot::new();
    pilot.run("add combobox Pick pick selection\nadd item a\nadd item b\nend\n");
    assert_eq!(pilot.take_reports(), ["pick=a"]);
    pilot.select("pick", 1).expect("select");
    assert_eq!(pilot.take_reports(), ["pick=b"]);
}

// ---------------------------------------------------------------------------
// App loop
// ---------------------------------------------------------------------------

#[test]
fn test_app_stops_at_exit_button() {
    let config = DialogConfig::new().with_title("Setup");
    let mut app = App::new(HeadlessRenderer::new(), ReportLog::new(), config);
    let input: &[u8] = b"add pushbutton Quit quit exit\nadd label Late late\n";
    let outcome = app.run_blocking(input).expect("run");
    assert_eq!(outcome, None);
    assert!(app.session().document().find_named("late").is_some());

    let quit = app.session().document().find_named("quit").expect("quit");
    app.session_mut().click(quit).expect("click");
    assert_eq!(app.session().outcome(), Some(Outcome::Rejected));
}

#[tokio::test]
async fn test_app_reads_split_commands() {
    let mut app = App::new(HeadlessRenderer::new(), ReportLog::new(), DialogConfig::new());
    let input = tokio_test::io::Builder::new()
        .read(b"add label \"Hel")
        .read(b"lo there\" greet\nque")
        .read(b"ry\n")
        .build();
    let outcome = app.run(input).await.expect("run");
    assert_eq!(outcome, None);
    assert_eq!(app.session().reporter().lines(), ["greet=Hello there"]);
}
